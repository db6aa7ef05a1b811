//! `reserve` - command-line front end for table reservations

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use reserve_client::{
    ClientConfig, ClientError, ClientResult, Notice, NoticeLevel, Operation, Reservation,
    ReservationRow, ReserveClient, Role,
};
use shared::models::{NewReservation, ReservationEdit, ReservationFilter, ReservationStatus};

#[derive(Parser)]
#[command(name = "reserve")]
#[command(about = "Restaurant table reservations")]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "RESERVE_API_URL")]
    api_url: Option<String>,

    /// Where the signed-in session is kept
    #[arg(long, global = true, env = "RESERVE_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `reserve_client=debug`
    #[arg(long, global = true, env = "RESERVE_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in
    Login {
        username: String,
        #[arg(long, env = "RESERVE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Verification code, when the service asks for one
        #[arg(long)]
        code: Option<String>,
    },
    /// Sign out (local only)
    Logout,
    /// Create an account
    Register {
        username: String,
        #[arg(long, env = "RESERVE_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm: String,
        #[arg(long, default_value_t = Role::User)]
        role: Role,
    },
    /// Show the signed-in principal
    Whoami,
    /// List reservations (staff see all, users their own)
    List {
        /// Status name or number (requested/1, approved/2, cancelled/3, completed/4)
        #[arg(long)]
        status: Option<ReservationStatus>,
        #[arg(long)]
        seats: Option<u32>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        /// Page size, used with --page
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Show one reservation
    Show { id: String },
    /// Book a table
    Book {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        party: u32,
        /// YYYY-MM-DD, tomorrow at the earliest
        #[arg(long)]
        date: NaiveDate,
    },
    /// Edit a pending reservation; omitted fields keep their value
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        party: Option<u32>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Approve a pending reservation (staff)
    Approve { id: String },
    /// Cancel a pending reservation
    Cancel { id: String },
    /// Mark an approved reservation completed (staff)
    Complete { id: String },
    /// List tables
    Tables,
    /// Add a table (staff)
    AddTable { seats: u32 },
    /// Raise the seat count of a table (staff)
    UpdateTable { id: String, seats: u32 },
}

impl Command {
    fn operation(&self) -> Operation {
        match self {
            Self::Login { .. } | Self::Logout | Self::Whoami => Operation::Login,
            Self::Register { .. } => Operation::Register,
            Self::List { .. } => Operation::ListReservations,
            Self::Show { .. } => Operation::ShowReservation,
            Self::Book { .. } => Operation::Book,
            Self::Edit { .. } => Operation::EditReservation,
            Self::Approve { .. } | Self::Cancel { .. } | Self::Complete { .. } => {
                Operation::UpdateStatus
            }
            Self::Tables => Operation::ListTables,
            Self::AddTable { .. } => Operation::AddTable,
            Self::UpdateTable { .. } => Operation::UpdateTable,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    if let Some(path) = cli.session_file {
        config = config.with_session_file(path);
    }
    if let Some(level) = cli.log_level {
        config = config.with_log_level(level);
    }
    let _log_guard =
        reserve_client::logger::init_logger(&config.log_level, config.log_dir.as_deref());

    let client = ReserveClient::new(config)?;
    let operation = cli.command.operation();

    match run(&client, cli.command).await {
        Ok(notice) => {
            print_notice(&notice);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            print_notice(&Notice::from_error(operation, &e));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(client: &ReserveClient, command: Command) -> ClientResult<Notice> {
    let desk = client.desk();
    match command {
        Command::Login {
            username,
            password,
            code,
        } => {
            let principal = client.login(&username, &password, code.as_deref()).await?;
            Ok(Notice::success(format!(
                "登录成功: {} ({})",
                principal.name, principal.role
            )))
        }
        Command::Logout => {
            client.logout()?;
            Ok(Notice::success("已退出登录"))
        }
        Command::Register {
            username,
            password,
            confirm,
            role,
        } => {
            let registered = client.register(&username, &password, &confirm, role).await?;
            Ok(Notice::success(format!("注册成功: {}", registered.username)))
        }
        Command::Whoami => {
            let principal = client.session().require_principal()?;
            Ok(Notice::success(format!(
                "{} ({}) id={}",
                principal.name, principal.role, principal.id
            )))
        }
        Command::List {
            status,
            seats,
            date,
            keyword,
            page,
            limit,
        } => {
            let mut filter = ReservationFilter::default();
            if let Some(status) = status {
                filter = filter.with_status(status);
            }
            if let Some(seats) = seats {
                filter = filter.with_seats(seats);
            }
            if let Some(date) = date {
                filter = filter.with_date(date);
            }
            if let Some(keyword) = keyword {
                filter = filter.with_keyword(keyword);
            }
            if let Some(page) = page {
                filter = filter.with_page(page, limit);
            }
            let rows = desk.rows(&filter).await?;
            for row in &rows {
                print_row(row);
            }
            Ok(Notice::success(format!("共 {} 条预订", rows.len())))
        }
        Command::Show { id } => {
            let reservation = desk.reservation(&id).await?;
            print_reservation(&reservation);
            Ok(Notice::success(reservation.status.label()))
        }
        Command::Book {
            name,
            phone,
            party,
            date,
        } => {
            let booking = NewReservation {
                name,
                phone,
                number_of_people: party,
                date,
            };
            let created = desk.book(&booking).await?;
            print_reservation(&created);
            Ok(Notice::success("预订成功"))
        }
        Command::Edit {
            id,
            name,
            phone,
            party,
            date,
        } => {
            let current = desk.reservation(&id).await?;
            let edit = ReservationEdit {
                name: name.unwrap_or_else(|| current.contact.name.clone()),
                phone: phone.unwrap_or_else(|| current.contact.phone.clone()),
                number_of_people: party.unwrap_or(current.number_of_people),
                date: match date {
                    Some(date) => date,
                    None => parse_stored_date(&current.date)?,
                },
            };
            let updated = desk.edit(&current, &edit).await?;
            print_reservation(&updated);
            Ok(Notice::success("修改成功"))
        }
        Command::Approve { id } => transition(client, &id, ReservationStatus::Approved).await,
        Command::Cancel { id } => transition(client, &id, ReservationStatus::Cancelled).await,
        Command::Complete { id } => transition(client, &id, ReservationStatus::Completed).await,
        Command::Tables => {
            let tables = desk.tables().await?;
            for table in &tables {
                println!("{:<28} {:>2}人桌", table.id, table.seats);
            }
            if client.session().principal().is_some_and(|p| p.is_staff()) {
                let options = desk.seat_options().await?;
                println!("可添加: {options:?}");
            }
            Ok(Notice::success(format!("共 {} 张餐桌", tables.len())))
        }
        Command::AddTable { seats } => {
            let table = desk.add_table(seats).await?;
            Ok(Notice::success(format!("已添加{}人桌 ({})", table.seats, table.id)))
        }
        Command::UpdateTable { id, seats } => {
            let table = desk.update_table(&id, seats).await?;
            Ok(Notice::success(format!("餐桌 {} 已改为{}人", table.id, table.seats)))
        }
    }
}

async fn transition(
    client: &ReserveClient,
    id: &str,
    target: ReservationStatus,
) -> ClientResult<Notice> {
    let updated = client.desk().transition_by_id(id, target).await?;
    Ok(Notice::success(format!("预订 {} {}", updated.id, updated.status.label())))
}

/// Stored dates may carry a time part
fn parse_stored_date(date: &str) -> ClientResult<NaiveDate> {
    let day = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| ClientError::InvalidResponse(format!("reservation date {date:?}: {e}")))
}

fn print_row(row: &ReservationRow) {
    let r = &row.reservation;
    let actions: Vec<&str> = row.actions.iter().map(|a| a.label()).collect();
    println!(
        "{:<28} {}  {:<10} {:<12} {:>2}人  {}  [{}]",
        r.id,
        r.date,
        r.contact.name,
        r.contact.phone,
        r.number_of_people,
        r.status.label(),
        actions.join(" ")
    );
}

fn print_reservation(r: &Reservation) {
    println!("编号: {}", r.id);
    println!("日期: {}", r.date);
    println!("联系人: {} {}", r.contact.name, r.contact.phone);
    println!("人数: {} ({}人桌)", r.number_of_people, r.table.seats);
    println!("状态: {}", r.status.label());
}

fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => println!("{}", notice.message),
        NoticeLevel::Warning | NoticeLevel::Error => {
            eprintln!("[{}] {}", notice.code.code(), notice.message);
            if notice.redirect_to_login {
                eprintln!("请先运行 `reserve login <username>`");
            }
            if notice.prompt_verification {
                eprintln!("请使用 `reserve login <username> --code <验证码>` 重试");
            }
        }
    }
}
