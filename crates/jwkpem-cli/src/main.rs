//! Print the signing keys of a Cognito user pool as PEM/DER
//!
//! ```not_rust
//! jwkpem --region eu-west-1 --poolid eu-west-1_AbCdEf --der > keys.json
//! ```
//!
//! The key set is written to stdout as a JSON object keyed by `kid`. Logs go
//! to stderr and honour `RUST_LOG`.
//!
//! Exit codes: `0` on success, `1` when the key set could not be fetched,
//! `2` for invalid configuration (no request is made).

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use jwkpem::{refresh, CognitoConfig, ConvertOptions, Error, KeySetCache, PemFormat, ReqwestSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "jwkpem",
    about = "Fetch a Cognito user pool's JWKS and print each key as PEM/DER",
    version
)]
struct Cli {
    /// AWS region of the user pool (e.g. eu-west-1)
    #[arg(long)]
    region: Option<String>,

    /// User pool ID (e.g. eu-west-1_AbCdEf)
    #[arg(long = "poolid", alias = "pool-id")]
    pool_id: Option<String>,

    /// Also export the hex-encoded PKCS#1 DER of every key
    #[arg(long)]
    der: bool,

    /// Emit "RSA PUBLIC KEY" (PKCS#1) PEM instead of "PUBLIC KEY" (SPKI)
    #[arg(long)]
    pkcs1: bool,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

impl Cli {
    fn config(&self) -> Result<CognitoConfig, Error> {
        CognitoConfig::new(
            self.region.clone().unwrap_or_default(),
            self.pool_id.clone().unwrap_or_default(),
        )
    }

    fn options(&self) -> ConvertOptions {
        let format = if self.pkcs1 {
            PemFormat::Pkcs1
        } else {
            PemFormat::Spki
        };
        ConvertOptions::new().include_der(self.der).pem_format(format)
    }
}

fn exit_code(err: &Error) -> u8 {
    if err.is_configuration() {
        2
    } else {
        1
    }
}

async fn run(cli: &Cli) -> Result<String, Error> {
    let config = cli.config()?;
    let jwks_uri = config.jwks_uri()?;

    let source = ReqwestSource::with_timeout(Duration::from_secs(cli.timeout));
    let cache = KeySetCache::new();

    let refreshed = refresh(&source, &jwks_uri, &cli.options(), &cache).await?;
    if !refreshed.errors.is_empty() {
        tracing::warn!(
            skipped = refreshed.errors.len(),
            "Some keys could not be converted and were left out"
        );
    }

    Ok(refreshed.key_set.to_json())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jwkpem=info,jwkpem_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => report_failure(&err),
    }
}

fn report_failure(err: &Error) -> ExitCode {
    tracing::error!(error = %err, "jwkpem failed");
    ExitCode::from(exit_code(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_parse_full() {
        let cli = Cli::try_parse_from([
            "jwkpem",
            "--region",
            "eu-west-1",
            "--poolid",
            "eu-west-1_AbCdEf",
            "--der",
            "--pkcs1",
            "--timeout",
            "3",
        ])
        .expect("parse");

        assert_eq!(cli.region.as_deref(), Some("eu-west-1"));
        assert_eq!(cli.pool_id.as_deref(), Some("eu-west-1_AbCdEf"));
        assert_eq!(cli.timeout, 3);

        let options = cli.options();
        assert!(options.includes_der());
        assert_eq!(options.format(), PemFormat::Pkcs1);
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["jwkpem", "--region", "us-east-1", "--pool-id", "p"])
            .expect("parse");
        assert_eq!(cli.pool_id.as_deref(), Some("p"));
        assert_eq!(cli.timeout, 10);
        assert_eq!(cli.options(), ConvertOptions::default());
    }

    #[test]
    fn test_missing_config_is_exit_code_2() {
        let cli = Cli::try_parse_from(["jwkpem", "--region", "us-east-1"]).expect("parse");
        let err = cli.config().unwrap_err();
        assert!(matches!(err, Error::ConfigurationInvalid(ref msg) if msg.contains("pool_id")));
        assert_eq!(exit_code(&err), 2);
    }

    #[tokio::test]
    async fn test_run_rejects_config_before_fetching() {
        let cli = Cli::try_parse_from(["jwkpem"]).expect("parse");
        let err = run(&cli).await.unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_fetch_error_is_exit_code_1() {
        let err = Error::SourceFetch("network: refused".into());
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_failure_is_reported_once() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .finish();

        let err = Error::SourceFetch("http: status 503 Service Unavailable".into());
        let _ = tracing::subscriber::with_default(subscriber, || report_failure(&err));

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("http: status 503").count(), 1);
        assert_eq!(output.lines().count(), 1);
    }
}
