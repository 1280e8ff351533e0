use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: IpAddr,
    pub port: u16,
    pub static_dir: PathBuf,
    pub max_body_size: usize,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub mail: MailConfig,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Sales mailbox that receives every submission.
    pub notify_to: String,
    pub from: Option<String>,
    pub max_in_flight: usize,
    pub transport: MailTransport,
}

#[derive(Debug, Clone)]
pub enum MailTransport {
    Smtp(SmtpConfig),
    Http(HttpRelayConfig),
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub tls: TlsMode,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TlsMode {
    StartTls,
    Tls,
    None,
}

#[derive(Debug, Clone)]
pub struct HttpRelayConfig {
    pub api_url: String,
    pub api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let database_url = env.required("DATABASE_URL")?;

        let db_max_connections: u32 = env
            .or("CONTACT_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid CONTACT_DB_MAX_CONNECTIONS: {e}"))?;

        let host: IpAddr = env
            .or("CONTACT_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid CONTACT_HOST: {e}"))?;

        let port: u16 = env
            .or("CONTACT_PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid CONTACT_PORT: {e}"))?;

        let static_dir = PathBuf::from(env.or("CONTACT_STATIC_DIR", "site"));

        let max_body_size: usize = env
            .or("CONTACT_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid CONTACT_MAX_BODY_SIZE: {e}"))?;

        let cors_origins: Vec<String> = env
            .or("CONTACT_CORS_ORIGINS", "")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let log_level = env.or("CONTACT_LOG_LEVEL", "info");

        let mail = mail_config(&env)?;

        Ok(Config {
            database_url,
            db_max_connections,
            host,
            port,
            static_dir,
            max_body_size,
            cors_origins,
            log_level,
            mail,
        })
    }
}

fn mail_config<F>(env: &Env<F>) -> Result<MailConfig, String>
where
    F: Fn(&str) -> Option<String>,
{
    let notify_to = env.or("CONTACT_NOTIFY_TO", "sales@dbmgroups.com");

    let max_in_flight: usize = env
        .or("CONTACT_MAIL_MAX_IN_FLIGHT", "16")
        .parse()
        .map_err(|e| format!("Invalid CONTACT_MAIL_MAX_IN_FLIGHT: {e}"))?;
    if max_in_flight == 0 {
        return Err("CONTACT_MAIL_MAX_IN_FLIGHT must be at least 1".to_string());
    }

    let smtp_user = env.optional("CONTACT_SMTP_USER");

    let transport = match env.or("CONTACT_MAIL_TRANSPORT", "smtp").as_str() {
        "smtp" => {
            let port: u16 = env
                .or("CONTACT_SMTP_PORT", "587")
                .parse()
                .map_err(|e| format!("Invalid CONTACT_SMTP_PORT: {e}"))?;

            let tls = match env.or("CONTACT_SMTP_TLS", "starttls").as_str() {
                "starttls" => TlsMode::StartTls,
                "tls" => TlsMode::Tls,
                "none" => TlsMode::None,
                other => return Err(format!("Invalid CONTACT_SMTP_TLS: {other}")),
            };

            MailTransport::Smtp(SmtpConfig {
                host: env.or("CONTACT_SMTP_HOST", "smtp.gmail.com"),
                port,
                user: smtp_user.clone(),
                pass: env.optional("CONTACT_SMTP_PASS"),
                tls,
            })
        }
        "http" => MailTransport::Http(HttpRelayConfig {
            api_url: env.or("CONTACT_MAIL_API_URL", "https://api.resend.com/emails"),
            api_key: env.optional("CONTACT_MAIL_API_KEY"),
        }),
        other => return Err(format!("Invalid CONTACT_MAIL_TRANSPORT: {other}")),
    };

    // The SMTP login doubles as the sender when no explicit one is given.
    let from = env.optional("CONTACT_MAIL_FROM").or(smtp_user);

    Ok(MailConfig {
        notify_to,
        from,
        max_in_flight,
        transport,
    })
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn required(&self, key: &str) -> Result<String, String> {
        self.optional(key)
            .ok_or_else(|| format!("Missing required environment variable: {key}"))
    }

    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}
