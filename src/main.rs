//! arcteller main entry point

use anyhow::bail;
use arcteller_client::{ApiClient, CancelToken};
use arcteller_config::{Config, ConfigError};
use arcteller_core::{format_display, ApiError, Eligibility, ReasonCode, Session, Transaction};
use arcteller_utils::{format_optional_amount, is_reference_code, mask_identifier};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "arcteller")]
#[command(version = "0.1.0")]
#[command(about = "Teller console for transaction lookup and reversal requests", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "arcteller.yaml", global = true)]
    config: PathBuf,

    /// Backend base URL, overrides the configuration file and environment
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Cashier national ID, used together with --clave
    #[arg(long, global = true, requires = "clave")]
    usuario: Option<String>,

    /// Cashier password
    #[arg(long, global = true, requires = "usuario")]
    clave: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check cashier credentials against the clients service
    Login,
    /// Search a transaction by its 6-digit reference code
    Buscar { codigo: String },
    /// Request the reversal of a transaction
    Devolver {
        codigo: String,
        /// ISO 20022 reason code
        #[arg(long, default_value = "AM04")]
        motivo: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        si: bool,
    },
    /// Resolve an account number or national ID to a savings account
    Cuenta {
        identificador: String,
        /// Also list the account movements
        #[arg(long)]
        movimientos: bool,
    },
    /// List reversal reason codes
    Motivos {
        /// Ask the backend for its catalogue instead of the built-in one
        #[arg(long)]
        remoto: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(error) => bail!("{}", error.report()),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.clone()))
        .init();
    log::debug!("Backend: {}", config.effective_base_url());

    let rt = Runtime::new()?;
    let result = rt.block_on(run(args, config));
    // A confirmation prompt abandoned on Ctrl-C may still be blocked on stdin
    rt.shutdown_background();
    result
}

fn load_config(args: &Args) -> Result<Config, ConfigError> {
    let config = Config::load_or_default(&args.config)?.with_base_url_override(args.base_url.clone());
    config.validate()?;
    Ok(config)
}

async fn run(args: Args, config: Config) -> anyhow::Result<()> {
    let token = CancelToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling pending request");
            ctrl_c.cancel();
        }
    });

    let api = ApiClient::from_config(&config)?.with_cancel(&token);

    let session = match (&args.usuario, &args.clave) {
        (Some(usuario), Some(clave)) => api.auth().start_session(usuario, clave).await?,
        _ => Session::anonymous(),
    };

    match args.command {
        Command::Login => login(&session),
        Command::Buscar { codigo } => search(&api, &codigo).await,
        Command::Devolver { codigo, motivo, si } => {
            reverse(&api, &token, &session, &codigo, &motivo, si).await
        }
        Command::Cuenta {
            identificador,
            movimientos,
        } => account(&api, &identificador, movimientos).await,
        Command::Motivos { remoto } => reasons(&api, remoto).await,
    }
}

fn login(session: &Session) -> anyhow::Result<()> {
    if !session.is_authenticated() {
        bail!("Indique --usuario y --clave para iniciar sesión");
    }
    println!("Bienvenido, {}", session.first_name());
    Ok(())
}

async fn find_transaction(api: &ApiClient, code: &str) -> anyhow::Result<Transaction> {
    let code = code.trim();
    if !is_reference_code(code) {
        return Err(ApiError::InvalidInput {
            message: "El código de referencia debe tener 6 dígitos".to_string(),
        }
        .into());
    }
    Ok(api.transactions().find_by_reference_code(code).await?)
}

async fn search(api: &ApiClient, code: &str) -> anyhow::Result<()> {
    let tx = find_transaction(api, code).await?;
    print_transaction(&tx);
    Ok(())
}

async fn reverse(
    api: &ApiClient,
    token: &CancelToken,
    session: &Session,
    code: &str,
    motivo: &str,
    confirmed: bool,
) -> anyhow::Result<()> {
    let reason: ReasonCode = motivo.parse().map_err(|_| ApiError::InvalidReasonCode {
        code: motivo.to_string(),
    })?;
    let tx = find_transaction(api, code).await?;
    print_transaction(&tx);

    if !tx.eligibility().can_reverse {
        bail!("La transacción {} no puede reversarse", tx.id_transaccion);
    }

    if !confirmed {
        let question = format!(
            "{}, ¿confirma la devolución de {} por {} ({})? [s/N] ",
            session.display_name(),
            format_optional_amount(tx.monto),
            reason,
            reason.description()
        );
        if !blocking_until_cancelled(token, move || confirm(&question)).await? {
            println!("Devolución cancelada");
            return Ok(());
        }
    }

    api.transactions().request_reversal(tx.id_transaccion, reason).await?;
    println!("Solicitud de devolución enviada para la transacción {}", tx.id_transaccion);
    Ok(())
}

async fn account(api: &ApiClient, identifier: &str, movements: bool) -> anyhow::Result<()> {
    let account = api.accounts().resolve(identifier).await?;
    println!("Cuenta:  {}", mask_identifier(&account.numero_cuenta));
    println!("Cliente: {}", account.id_cliente);
    println!("Saldo:   {}", format_optional_amount(account.saldo));
    println!("Estado:  {}", account.estado.as_deref().unwrap_or("-"));

    if movements {
        let list = api.transactions().get_by_account(account.id_cuenta).await?;
        if list.is_empty() {
            println!("Sin movimientos");
        }
        for tx in &list {
            println!(
                "  {}  {:<8}  {:>14}  {}",
                format_display(tx.fecha_creacion.as_ref()),
                tx.tipo_operacion.as_deref().unwrap_or("-"),
                format_optional_amount(tx.monto),
                tx.estado.as_deref().unwrap_or("-")
            );
        }
    }
    Ok(())
}

async fn reasons(api: &ApiClient, remote: bool) -> anyhow::Result<()> {
    if remote {
        for reason in api.transactions().get_reversal_reasons().await? {
            println!("{}  {}", reason.codigo, reason.descripcion.as_deref().unwrap_or("-"));
        }
    } else {
        for reason in ReasonCode::ALL {
            let marker = if reason == ReasonCode::default() { "*" } else { " " };
            println!("{}{}  {}", marker, reason, reason.description());
        }
    }
    Ok(())
}

fn print_transaction(tx: &Transaction) {
    println!("Transacción {}", tx.id_transaccion);
    println!("  Código:       {}", tx.codigo_referencia.as_deref().unwrap_or("-"));
    println!("  Referencia:   {}", tx.referencia.as_deref().unwrap_or("-"));
    println!("  Fecha:        {}", format_display(tx.fecha_creacion.as_ref()));
    println!("  Tipo:         {}", tx.tipo_operacion.as_deref().unwrap_or("-"));
    println!("  Monto:        {}", format_optional_amount(tx.monto));
    println!("  Estado:       {}", tx.estado.as_deref().unwrap_or("-"));
    if let Some(switch) = &tx.estado_switch {
        println!("  Switch:       {}", switch);
    }
    if let Some(name) = &tx.nombre_beneficiario {
        println!("  Beneficiario: {}", name);
    }
    print_eligibility(&tx.eligibility());
    if !tx.flags_consistent() {
        log::warn!("Transaction {} reports inconsistent reversal flags", tx.id_transaccion);
    }
}

fn print_eligibility(eligibility: &Eligibility) {
    let mark = |ok: bool| if ok { "[x]" } else { "[ ]" };
    println!("  {} Tipo reversible", mark(eligibility.reversible_type));
    println!("  {} Dentro de 24 horas", mark(eligibility.within_24_hours));
    println!("  {} Estado válido", mark(eligibility.valid_status));
    println!(
        "  {}",
        if eligibility.can_reverse {
            "Puede reversarse"
        } else {
            "No puede reversarse"
        }
    );
}

/// Run a blocking terminal read off the runtime; Ctrl-C abandons it
async fn blocking_until_cancelled<T, F>(token: &CancelToken, read: F) -> anyhow::Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> io::Result<T> + Send + 'static,
{
    let task = tokio::task::spawn_blocking(read);
    tokio::select! {
        _ = token.cancelled() => Err(ApiError::Cancelled.into()),
        answer = task => Ok(answer??),
    }
}

fn confirm(question: &str) -> io::Result<bool> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí"))
}
