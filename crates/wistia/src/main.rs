use chrono::prelude::*;
use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use wistia::util::ErrorExt as _;
use wistia::{tracing_err, Client, Config, Method, Payload, ProjectOptions, RequiredParams};

/// Command line interface for the Wistia data API.
///
/// The credentials are read from `WISTIA_API_PASSWORD`, `WISTIA_ACCOUNT`
/// and `WISTIA_EXPIRY_DELTA` env vars, or a `.env` file.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(clap::Subcommand)]
enum Cmd {
    /// Request an expiring token
    Token(TokenArgs),

    /// Request an expiring token for uploading into the given project
    UploadToken {
        project_id: String,

        #[command(flatten)]
        token: TokenArgs,
    },

    /// Create a project
    ProjectCreate {
        name: String,

        /// Defaults to `false`
        #[arg(long)]
        anonymous_can_upload: Option<bool>,

        /// Defaults to `false`
        #[arg(long)]
        anonymous_can_download: Option<bool>,

        /// Defaults to `true`
        #[arg(long)]
        public: Option<bool>,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Update the media with the given hashed ID
    MediaUpdate {
        hashed_id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete the media with the given hashed ID
    MediaDelete { hashed_id: String },

    /// Call an arbitrary API endpoint, e.g. `medias.json`
    Call {
        rel_path: String,

        #[arg(long, value_enum, default_value = "get")]
        method: Method,

        #[command(flatten)]
        fields: FieldArgs,
    },
}

#[derive(clap::Args)]
struct TokenArgs {
    /// Param that the uploader must supply, in `NAME=VALUE` format
    #[arg(long = "require", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    required_params: Vec<(String, String)>,

    /// Unix timestamp in seconds. Defaults to now plus the configured expiry delta
    #[arg(long, value_parser = parse_timestamp)]
    expires_at: Option<DateTime<Utc>>,
}

#[derive(clap::Args)]
struct FieldArgs {
    /// Request body field, in `NAME=VALUE` format
    #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    fields: Vec<(String, String)>,
}

impl FieldArgs {
    fn into_payload(self) -> Payload {
        self.fields.into_iter().collect()
    }
}

enum Output {
    Token(String),
    Json(serde_json::Value),
}

fn main() -> ExitCode {
    let args = Args::parse();

    if dotenvy::dotenv().is_err() {
        eprintln!("Dotenv config was not found, ignoring this...")
    }

    wistia::init_logging();

    let output = match try_main(args) {
        Ok(output) => output,
        Err(err) => {
            error!(err = tracing_err(&err), "Exiting with an error...");
            eprintln!("Error: {}", err.display_chain());
            return ExitCode::FAILURE;
        }
    };

    match output {
        Output::Token(token) => println!("{token}"),
        Output::Json(json) => println!("{json:#}"),
    }

    ExitCode::SUCCESS
}

fn try_main(args: Args) -> wistia::Result<Output> {
    let client = Client::new(Config::from_env("WISTIA_")?)?;

    let output = match args.cmd {
        Cmd::Token(token) => {
            let required_params: RequiredParams = token.required_params.into_iter().collect();
            Output::Token(client.get_expiring_token(&required_params, token.expires_at)?)
        }
        Cmd::UploadToken { project_id, token } => {
            let required_params: RequiredParams = token.required_params.into_iter().collect();
            Output::Token(client.get_upload_expiring_token(
                &project_id,
                &required_params,
                token.expires_at,
            )?)
        }
        Cmd::ProjectCreate {
            name,
            anonymous_can_upload,
            anonymous_can_download,
            public,
            fields,
        } => {
            let options = ProjectOptions {
                anonymous_can_upload,
                anonymous_can_download,
                public,
                extra: fields.into_payload(),
            };
            Output::Json(client.project_create(&name, options)?)
        }
        Cmd::MediaUpdate { hashed_id, fields } => {
            Output::Json(client.medias_update(&hashed_id, fields.into_payload())?)
        }
        Cmd::MediaDelete { hashed_id } => {
            Output::Json(client.medias_delete(&hashed_id, Payload::new())?)
        }
        Cmd::Call {
            rel_path,
            method,
            fields,
        } => {
            let payload = fields.into_payload();
            let payload = (!payload.is_empty()).then_some(payload);
            Output::Json(client.call(&rel_path, payload, method)?)
        }
    };

    Ok(output)
}

fn parse_key_value(input: &str) -> Result<(String, String), String> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected `NAME=VALUE`, but got '{input}'"))?;

    Ok((key.to_owned(), value.to_owned()))
}

fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, String> {
    let secs: i64 = input
        .parse()
        .map_err(|err| format!("invalid unix timestamp '{input}': {err}"))?;

    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| format!("unix timestamp '{input}' is out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn key_value() {
        assert_eq!(
            parse_key_value("name=a=b"),
            Ok(("name".to_owned(), "a=b".to_owned()))
        );
        assert!(parse_key_value("name").is_err());
    }

    #[test]
    fn call_args() {
        let args = Args::try_parse_from([
            "wistia", "call", "medias.json", "--method", "put", "--field", "a=1",
        ])
        .unwrap();

        let Cmd::Call {
            rel_path,
            method,
            fields,
        } = args.cmd
        else {
            panic!("expected the call command");
        };

        assert_eq!(rel_path, "medias.json");
        assert_eq!(method, Method::Put);
        assert_eq!(fields.into_payload(), Payload::new().with("a", 1));
    }
}
