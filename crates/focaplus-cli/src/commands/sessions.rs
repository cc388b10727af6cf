use clap::Subcommand;

use focaplus_core::storage::Config;
use focaplus_core::ApiClient;

#[derive(Subcommand)]
pub enum SessionsAction {
    /// List sessions, all of them or one discipline's
    List {
        /// Restrict to a discipline instance
        #[arg(long)]
        discipline: Option<String>,
    },
    /// Show one session
    Show {
        /// Session id
        id: String,
    },
    /// Delete a session
    Delete {
        /// Session id
        id: String,
    },
}

pub async fn run(action: SessionsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let api = ApiClient::from_config(&config)?;

    match action {
        SessionsAction::List { discipline } => {
            let sessions = match discipline {
                Some(id) => api.study_sessions_by_discipline(&id).await?,
                None => api.list_study_sessions().await?,
            };
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
        SessionsAction::Show { id } => {
            let session = api.get_study_session(&id).await?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        SessionsAction::Delete { id } => {
            api.delete_study_session(&id).await?;
            println!("Session deleted: {id}");
        }
    }
    Ok(())
}
