use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;

use kidscare_client::api::types::ChildProfileFields;
use kidscare_client::api::{announcements, profiles, records};
use kidscare_client::bmi::Bmi;
use kidscare_client::commands::{self, CommandError};
use kidscare_client::config::Config;
use kidscare_client::session::{KeychainTokenStore, MemoryTokenStore, TokenStore};
use kidscare_client::state::AppState;

mod cli {
    use clap::{Args as ClapArgs, Parser, Subcommand};

    #[derive(Parser, Debug)]
    #[command(name = "kidscare", version, about = "KidsCare health record client")]
    pub struct Args {
        /// Backend base URL (overrides KIDSCARE_API_URL)
        #[arg(long, global = true)]
        pub api_url: Option<String>,

        /// Keep the session in memory only instead of the OS keychain
        #[arg(long, global = true)]
        pub ephemeral: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Subcommand, Debug)]
    pub enum Command {
        /// Log in and store the session token
        Login {
            #[arg(long)]
            user_name: String,
            #[arg(long, env = "KIDSCARE_PASSWORD", hide_env_values = true)]
            password: String,
        },
        /// Log out and forget the stored session token
        Logout,
        /// Show the user embedded in the stored session token
        Whoami,
        /// Parent's display name
        Parent,
        /// Doctor's display name and credentials
        Doctor,
        /// Children of the logged-in parent
        Children,
        /// Patients of the logged-in doctor
        Patients {
            /// Case-insensitive name filter
            #[arg(long)]
            search: Option<String>,
        },
        /// Medical fields of one child
        ChildFields { child_id: String },
        /// Update medical fields of one child
        UpdateFields {
            child_id: String,
            #[command(flatten)]
            fields: FieldArgs,
        },
        /// Change the account password
        ChangePassword {
            #[arg(long)]
            user_name: String,
            #[arg(long, env = "KIDSCARE_PASSWORD", hide_env_values = true)]
            password: String,
            #[arg(long, env = "KIDSCARE_NEW_PASSWORD", hide_env_values = true)]
            new_password: String,
        },
        /// Request password reset instructions by email
        ForgotPassword { email: String },
        /// Announcements, newest first
        Announcements,
        /// Calculate BMI from height (cm) and weight (kg)
        Bmi { height_cm: String, weight_kg: String },
    }

    #[derive(ClapArgs, Debug)]
    pub struct FieldArgs {
        #[arg(long)]
        pub allergies: Option<String>,
        #[arg(long)]
        pub born_diseases: Option<String>,
        #[arg(long)]
        pub vaccines_given: Option<String>,
        #[arg(long)]
        pub vaccines_to_be_given: Option<String>,
        #[arg(long)]
        pub medical_records: Option<String>,
    }
}

use cli::Command;

const RESET_SENT: &str = "Password reset instructions have been sent to your email.";

fn print_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Fields view with screen placeholders filled in.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChildFieldsView<'a> {
    allergies: &'a str,
    born_diseases: &'a str,
    vaccines_given: &'a str,
    vaccines_to_be_given: &'a str,
    medical_records: &'a str,
}

async fn run(state: &AppState, command: Command) -> Result<(), CommandError> {
    match command {
        Command::Login {
            user_name,
            password,
        } => {
            let identity = commands::login(state, &user_name, &password).await?;
            print_json(&identity)
        }
        Command::Logout => commands::logout(state).await,
        Command::Whoami => match commands::current_user(state) {
            Some(identity) => print_json(&identity),
            None => Err(CommandError::Validation("Not logged in".to_string())),
        },
        Command::Parent => {
            let name = profiles::parent_name(&state.api).await?;
            print_json(&serde_json::json!({ "fullName": name }))
        }
        Command::Doctor => {
            let info = profiles::doctor_info(&state.api).await?;
            print_json(&serde_json::json!({
                "fullName": info.full_name,
                "credentials": info.credentials,
            }))
        }
        Command::Children => {
            let name = profiles::parent_name(&state.api).await?;
            let children = profiles::parent_child_profiles(&state.api).await?;
            print_json(&serde_json::json!({ "parentName": name, "childProfiles": children }))
        }
        Command::Patients { search } => {
            let patients = profiles::doctor_child_profiles(&state.api).await?;
            let query = search.unwrap_or_default();
            print_json(&profiles::filter_patients(&patients, &query))
        }
        Command::ChildFields { child_id } => {
            let fields = records::fetch_child_fields(&state.api, &child_id).await?;
            print_json(&ChildFieldsView {
                allergies: fields.allergies_display(),
                born_diseases: fields.born_diseases_display(),
                vaccines_given: fields.vaccines_given_display(),
                vaccines_to_be_given: fields.vaccines_to_be_given_display(),
                medical_records: fields.medical_records_display(),
            })
        }
        Command::UpdateFields { child_id, fields } => {
            let update = ChildProfileFields {
                allergies: fields.allergies,
                born_diseases: fields.born_diseases,
                vaccines_given: fields.vaccines_given,
                vaccines_to_be_given: fields.vaccines_to_be_given,
                medical_records: fields.medical_records,
            };
            commands::save_child_fields(state, &child_id, &update).await
        }
        Command::ChangePassword {
            user_name,
            password,
            new_password,
        } => commands::change_password(state, &user_name, &password, &new_password).await,
        Command::ForgotPassword { email } => {
            let message = commands::forgot_password(state, &email).await?;
            let message = message.unwrap_or_else(|| RESET_SENT.to_string());
            print_json(&serde_json::json!({ "message": message }))
        }
        Command::Announcements => {
            let items = announcements::list(&state.api).await?;
            print_json(&items)
        }
        Command::Bmi {
            height_cm,
            weight_kg,
        } => {
            let bmi = Bmi::from_input(&height_cm, &weight_kg)
                .map_err(|e| CommandError::Validation(e.to_string()))?;
            print_json(&bmi)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Optional .env in the working directory
    let _ = dotenvy::dotenv();

    env_logger::init();

    let args = cli::Args::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }

    let tokens: Arc<dyn TokenStore> = if args.ephemeral {
        Arc::new(MemoryTokenStore::new())
    } else {
        match KeychainTokenStore::new(&config.keychain_service) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                log::warn!("Keychain unavailable, session will not persist: {}", e);
                Arc::new(MemoryTokenStore::new())
            }
        }
    };

    log::info!("Using API at {}", config.api_base_url);
    let state = AppState::new(&config, tokens);

    match run(&state, args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let notice = e.notice("Error");
            eprintln!("{}: {}", notice.title, notice.message);
            ExitCode::FAILURE
        }
    }
}
