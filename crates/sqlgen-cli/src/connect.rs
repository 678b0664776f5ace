use sqlgen::{ConnectionDescriptor, Dialect, SqlgenError};
use sqlx::mysql::{MySqlConnectOptions, MySqlSslMode};
use std::time::Duration;
use tokio_postgres::NoTls;
use tokio_postgres::config::SslMode;
use tracing::{debug, info, warn};

/// Reject a DSN whose protocol belongs to the other front-end.
pub fn check_protocol(dialect: Dialect, descriptor: &ConnectionDescriptor) -> anyhow::Result<()> {
    let Some(protocol) = descriptor.protocol.as_deref() else {
        return Ok(());
    };
    let ok = match dialect {
        Dialect::MySql => matches!(protocol, "mysql" | "mariadb" | "tcp" | "unix"),
        Dialect::Postgres => matches!(protocol, "postgres" | "postgresql"),
    };
    if !ok {
        anyhow::bail!("unsupported protocol {protocol:?} for a {dialect} DSN");
    }
    Ok(())
}

pub fn postgres_config(
    descriptor: &ConnectionDescriptor,
) -> anyhow::Result<tokio_postgres::Config> {
    // libpq keywords in a URI query override the URI's own parts, so
    // `postgresql:///app?host=/var/run/postgresql` reaches the socket.
    let mut config = tokio_postgres::Config::new();
    let host = descriptor.param("host").or(descriptor.host.as_deref());
    config.host(host.unwrap_or("localhost"));
    let port = match descriptor.param("port") {
        Some(port) => Some(
            port.parse::<u16>()
                .map_err(|_| anyhow::anyhow!("invalid port: {port}"))?,
        ),
        None => descriptor.port,
    };
    if let Some(port) = port {
        config.port(port);
    }
    if let Some(user) = descriptor.param("user").or(descriptor.user.as_deref()) {
        config.user(user);
    }
    if let Some(password) = descriptor.param("password").or(descriptor.password.as_deref()) {
        config.password(password);
    }
    if let Some(database) = descriptor.param("dbname").or(descriptor.database.as_deref()) {
        config.dbname(database);
    }

    for (key, value) in &descriptor.params {
        match key.as_str() {
            "host" | "port" | "user" | "password" | "dbname" => {}
            "application_name" => {
                config.application_name(value);
            }
            "options" => {
                config.options(value);
            }
            "connect_timeout" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid connect_timeout: {value}"))?;
                config.connect_timeout(Duration::from_secs(secs));
            }
            "sslmode" => {
                let mode = match value.as_str() {
                    "disable" => SslMode::Disable,
                    "allow" | "prefer" => SslMode::Prefer,
                    other => {
                        anyhow::bail!("sslmode={other} needs TLS, which psqlgen does not support")
                    }
                };
                config.ssl_mode(mode);
            }
            _ => debug!(param = %key, "ignoring connection parameter"),
        }
    }

    Ok(config)
}

pub fn mysql_options(descriptor: &ConnectionDescriptor) -> anyhow::Result<MySqlConnectOptions> {
    let mut options = MySqlConnectOptions::new();

    match (descriptor.protocol.as_deref(), descriptor.host.as_deref()) {
        (Some("unix"), Some(path)) => options = options.socket(path),
        (_, host) => {
            options = options.host(host.unwrap_or("localhost"));
            if let Some(port) = descriptor.port {
                options = options.port(port);
            }
        }
    }
    if let Some(user) = &descriptor.user {
        options = options.username(user);
    }
    if let Some(password) = &descriptor.password {
        options = options.password(password);
    }
    if let Some(database) = &descriptor.database {
        options = options.database(database);
    }

    for (key, value) in &descriptor.params {
        match key.as_str() {
            "charset" => options = options.charset(value),
            "collation" => options = options.collation(value),
            "ssl-mode" | "sslmode" => {
                let mode: MySqlSslMode = value
                    .parse()
                    .map_err(|e: sqlx::Error| anyhow::anyhow!("invalid {key}: {e}"))?;
                options = options.ssl_mode(mode);
            }
            // Go driver spelling.
            "tls" => {
                let mode = match value.as_str() {
                    "false" => MySqlSslMode::Disabled,
                    "preferred" => MySqlSslMode::Preferred,
                    "skip-verify" => MySqlSslMode::Required,
                    "true" => MySqlSslMode::VerifyIdentity,
                    other => anyhow::bail!("invalid tls: {other}"),
                };
                options = options.ssl_mode(mode);
            }
            _ => debug!(param = %key, "ignoring connection parameter"),
        }
    }

    Ok(options)
}

pub async fn connect_postgres(
    descriptor: &ConnectionDescriptor,
) -> anyhow::Result<tokio_postgres::Client> {
    let config = postgres_config(descriptor)?;
    let (client, connection) = config
        .connect(NoTls)
        .await
        .map_err(SqlgenError::connection)?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            warn!(error = %e, "postgres connection error");
        }
    });
    info!("connected to postgres");
    Ok(client)
}

pub async fn connect_mysql(
    descriptor: &ConnectionDescriptor,
) -> anyhow::Result<sqlx::MySqlConnection> {
    use sqlx::Connection as _;

    let options = mysql_options(descriptor)?;
    let conn = sqlx::MySqlConnection::connect_with(&options)
        .await
        .map_err(SqlgenError::connection)?;
    info!("connected to mysql");
    Ok(conn)
}
