use clap::Subcommand;
use focaplus_core::auth;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the backend bearer token in the OS keyring
    SetToken {
        /// The token value
        token: String,
    },
    /// Check whether a token is stored
    Status,
    /// Remove the stored token
    Clear,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::SetToken { token } => {
            auth::set_token(&token)?;
            println!("token stored");
        }
        AuthAction::Status => match auth::token()? {
            Some(_) => println!("token present"),
            None => println!("no token stored"),
        },
        AuthAction::Clear => {
            auth::clear_token()?;
            println!("token cleared");
        }
    }
    Ok(())
}
