use clap::{Arg, ArgAction, Command};
use tebs_credentials::{service_account_from_env, EnvFile};
use tebs_ops::{list_collections, tag_subsidiary, FailurePolicy};
use tebs_store::{CollectionPath, FirestoreStore};

const DEFAULT_ENV_FILE: &str = ".env.local";
const DEFAULT_PROJECTS_DB: &str = "tebs-erl";
const DEFAULT_YEAR: &str = "2025";

/// Nested projects collection: `projects/{projects_db}/projects/{year}/projects`
fn nested_projects_path(projects_db: &str, year: &str) -> String {
    format!("projects/{projects_db}/projects/{year}/projects")
}

fn env_file_arg() -> Arg {
    Arg::new("env-file")
        .long("env-file")
        .default_value(DEFAULT_ENV_FILE)
        .help("Credential env file with the admin service-account fields")
}

async fn connect(env_file: &str, database: &str) -> anyhow::Result<FirestoreStore> {
    let env = EnvFile::load(env_file)?;
    let key = service_account_from_env(&env)?;
    Ok(FirestoreStore::connect(key, database).await?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Command::new("tebs-admin")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Administrative tooling for the TEBS Firestore database")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tag")
                .about("Set subsidiary = \"ERL\" on every project document")
                .arg(env_file_arg())
                .arg(
                    Arg::new("database")
                        .long("database")
                        .default_value(FirestoreStore::DEFAULT_DATABASE)
                        .help("Firestore database id to connect to"),
                )
                .arg(
                    Arg::new("projects-db")
                        .long("projects-db")
                        .default_value(DEFAULT_PROJECTS_DB)
                        .help("Projects database segment of the nested collection path"),
                )
                .arg(
                    Arg::new("year")
                        .long("year")
                        .default_value(DEFAULT_YEAR)
                        .help("Year whose project documents are tagged"),
                )
                .arg(
                    Arg::new("keep-going")
                        .long("keep-going")
                        .action(ArgAction::SetTrue)
                        .help("Record per-document failures and continue instead of aborting"),
                ),
        )
        .subcommand(
            Command::new("collections")
                .about("List top-level collection identifiers")
                .arg(env_file_arg())
                .arg(
                    Arg::new("database")
                        .long("database")
                        .default_value(DEFAULT_PROJECTS_DB)
                        .help("Firestore database id to connect to"),
                ),
        );

    let matches = cli.get_matches();
    match matches.subcommand() {
        Some(("tag", args)) => {
            let env_file = args.get_one::<String>("env-file").unwrap();
            let database = args.get_one::<String>("database").unwrap();
            let projects_db = args.get_one::<String>("projects-db").unwrap();
            let year = args.get_one::<String>("year").unwrap();
            let policy = if args.get_flag("keep-going") {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Abort
            };

            let store = connect(env_file, database).await?;
            let collections = vec![
                CollectionPath::parse(nested_projects_path(projects_db, year))?,
                CollectionPath::parse(year.as_str())?,
            ];

            let report = tag_subsidiary(&store, &collections, policy).await?;
            println!("Updated {} documents to ERL", report.updated);

            if !report.failures.is_empty() {
                for failure in &report.failures {
                    eprintln!("failed to update {}: {}", failure.doc, failure.error);
                }
                std::process::exit(1);
            }
        }
        Some(("collections", args)) => {
            let env_file = args.get_one::<String>("env-file").unwrap();
            let database = args.get_one::<String>("database").unwrap();

            let store = connect(env_file, database).await?;
            for id in &list_collections(&store).await? {
                println!("{id}");
            }
        }
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_path_matches_store_layout() {
        assert_eq!(
            nested_projects_path("tebs-erl", "2025"),
            "projects/tebs-erl/projects/2025/projects"
        );
    }

    #[test]
    fn nested_path_is_a_valid_collection() {
        let path = nested_projects_path(DEFAULT_PROJECTS_DB, DEFAULT_YEAR);
        assert!(CollectionPath::parse(path).is_ok());
    }
}
