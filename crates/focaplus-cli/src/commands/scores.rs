use clap::Subcommand;

use focaplus_core::api::sum_points;
use focaplus_core::storage::Config;
use focaplus_core::ApiClient;

#[derive(Subcommand)]
pub enum ScoresAction {
    /// Sum score records, the same way the app computes totals
    Total {
        /// Records of one discipline instance
        #[arg(long)]
        discipline: Option<String>,
        /// Records of one course enrolment
        #[arg(long)]
        course: Option<String>,
        /// All of the current user's records
        #[arg(long)]
        me: bool,
    },
}

pub async fn run(action: ScoresAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let api = ApiClient::from_config(&config)?;

    match action {
        ScoresAction::Total {
            discipline,
            course,
            me,
        } => {
            let records = match (discipline, course, me) {
                (Some(id), None, false) => api.scores_by_discipline(&id).await?,
                (None, Some(id), false) => api.scores_by_course(&id).await?,
                (None, None, true) => api.my_scores().await?,
                _ => {
                    return Err(
                        "pass exactly one of --discipline <id>, --course <id>, --me".into(),
                    )
                }
            };
            let output = serde_json::json!({
                "records": records.len(),
                "total_points": sum_points(&records),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
