use analytics::{AnalyticsEngine, equity, grouping, metrics};
use chrono::{Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{Table, presets::UTF8_FULL};
use core_types::{Trade, TradeFilter, TradeType, UserSession};
use database::JournalRepository;
use database::connection::{close, connect};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// The main entry point for the trade journal CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env first so JOURNAL_* overrides are visible to the config loader.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let settings = configuration::load_config()?;

    // The CLI stands in for the external auth layer: it hands us a typed
    // session, and the numeric journal user id is resolved through it.
    let session = UserSession {
        id: cli.discord_id.clone(),
        discord_id: cli.discord_id.clone(),
        username: cli.username.clone(),
        avatar: None,
    };
    let user_id = session.user_id()?;
    tracing::info!(username = %session.username, user_id, "starting journal analysis");

    let pool = connect(&settings.database).await?;
    let repo = JournalRepository::new(pool.clone());
    let engine = AnalyticsEngine::new(settings.analytics.risk_free_rate);
    let filter = TradeFilter {
        trade_type: cli.trade_type.map(Into::into),
        limit: None,
    };

    let result = run_command(&cli, &repo, &engine, user_id, &filter).await;
    close(pool).await;
    result
}

async fn run_command(
    cli: &Cli,
    repo: &JournalRepository,
    engine: &AnalyticsEngine,
    user_id: i64,
    filter: &TradeFilter,
) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Summary => {
            let trades = repo.trades_for_user(user_id, filter).await?;
            print_summary(engine, &trades)?;
        }
        Commands::Analytics => {
            let trades = repo.trades_for_user(user_id, filter).await?;
            print_analytics(&trades);
        }
        Commands::Strategies => {
            let trades = repo.trades_for_user(user_id, filter).await?;
            print_strategies(&trades);
        }
        Commands::Grades => {
            let trades = repo.trades_for_user(user_id, filter).await?;
            print_grades(&trades);
        }
        Commands::Mistakes(args) => {
            let trades = repo.trades_for_user(user_id, filter).await?;
            print_mistakes(&trades, args.days);
        }
        Commands::Calendar(args) => {
            let trades = repo.trades_for_user(user_id, filter).await?;
            print_calendar(&trades, args.from, args.to);
        }
        Commands::Trades(args) => {
            let filter = TradeFilter {
                trade_type: filter.trade_type,
                limit: Some(args.limit),
            };
            let trades = repo.recent_trades(user_id, &filter).await?;
            print_trades(&trades);
        }
    }
    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Performance analytics over a logged trade journal.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Discord id of the journal owner (trades are keyed by it).
    #[arg(long, global = true, default_value = "0")]
    discord_id: String,

    /// Display name for the session.
    #[arg(long, global = true, default_value = "local")]
    username: String,

    /// Restrict the analysis to live or backtest trades.
    #[arg(long, global = true, value_enum)]
    trade_type: Option<TradeTypeArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Overall performance summary and streaks.
    Summary,
    /// Hour-of-day, day-of-week and R:R efficiency breakdowns.
    Analytics,
    /// Performance per strategy.
    Strategies,
    /// Performance per setup grade.
    Grades,
    /// Mistake frequency, cost and recent trends.
    Mistakes(MistakesArgs),
    /// Daily P&L over a date range.
    Calendar(CalendarArgs),
    /// Recent trade listing.
    Trades(TradesArgs),
}

#[derive(Parser)]
struct MistakesArgs {
    /// How many days back the trend window reaches.
    #[arg(long, default_value_t = 30)]
    days: i64,
}

#[derive(Parser)]
struct CalendarArgs {
    /// Start of the range (YYYY-MM-DD).
    #[arg(long)]
    from: NaiveDate,

    /// End of the range (YYYY-MM-DD).
    #[arg(long)]
    to: NaiveDate,
}

#[derive(Parser)]
struct TradesArgs {
    /// Maximum number of trades to list.
    #[arg(long, default_value_t = 50)]
    limit: i64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TradeTypeArg {
    Live,
    Backtest,
}

impl From<TradeTypeArg> for TradeType {
    fn from(arg: TradeTypeArg) -> Self {
        match arg {
            TradeTypeArg::Live => TradeType::Live,
            TradeTypeArg::Backtest => TradeType::Backtest,
        }
    }
}

// ==============================================================================
// Rendering
// ==============================================================================

fn print_summary(engine: &AnalyticsEngine, trades: &[Trade]) -> anyhow::Result<()> {
    let summary = engine.summary(trades)?;

    let rows: Vec<(&str, String)> = vec![
        ("Total trades", summary.total_trades.to_string()),
        (
            "Wins / Losses / BE",
            format!("{} / {} / {}", summary.wins, summary.losses, summary.breakeven),
        ),
        ("Total P&L", money(summary.total_pnl)),
        ("Win rate", percent(summary.win_rate)),
        ("Average win", money(summary.average_win)),
        ("Average loss", money(summary.average_loss)),
        ("Profit factor", summary.profit_factor.to_string()),
        ("Expectancy", money(summary.expectancy)),
        ("Sharpe ratio", summary.sharpe_ratio.to_string()),
        ("Max drawdown", percent(summary.max_drawdown_pct)),
        (
            "Longest streaks",
            format!(
                "{} wins / {} losses",
                summary.streaks.longest_win_streak, summary.streaks.longest_loss_streak
            ),
        ),
        (
            "Current streak",
            format!(
                "{:?} x{}",
                summary.streaks.current_streak_type, summary.streaks.current_streak_count
            ),
        ),
    ];

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(["Metric", "Value"]);
    for (metric, value) in rows {
        table.add_row([metric.to_string(), value]);
    }
    println!("{table}");
    Ok(())
}

fn print_analytics(trades: &[Trade]) {
    let mut hours = Table::new();
    hours
        .load_preset(UTF8_FULL)
        .set_header(["Hour", "Trades", "Win rate", "Avg P&L", "Total P&L"]);
    for row in grouping::by_hour(trades) {
        hours.add_row([
            format!("{:02}:00", row.hour),
            row.total.to_string(),
            percent(row.win_rate),
            money(row.avg_pnl),
            money(row.total_pnl),
        ]);
    }
    println!("Performance by hour of day\n{hours}");

    let mut days = Table::new();
    days.load_preset(UTF8_FULL)
        .set_header(["Day", "Trades", "Win rate", "Avg P&L", "Total P&L"]);
    for row in grouping::by_weekday(trades) {
        days.add_row([
            row.day_name,
            row.total.to_string(),
            percent(row.win_rate),
            money(row.avg_pnl),
            money(row.total_pnl),
        ]);
    }
    println!("Performance by day of week\n{days}");

    let mut rr = Table::new();
    rr.load_preset(UTF8_FULL)
        .set_header(["Target R:R", "Trades", "Wins", "Actual R", "Efficiency"]);
    for row in metrics::rr_efficiency(trades) {
        rr.add_row([
            row.target_rr,
            row.count.to_string(),
            row.wins.to_string(),
            row.avg_actual_rr.to_string(),
            percent(row.efficiency),
        ]);
    }
    println!("R:R efficiency\n{rr}");

    let curve: Vec<Decimal> = equity::equity_curve(trades)
        .into_iter()
        .map(|p| p.cumulative_pnl)
        .collect();
    println!("Max drawdown: {}", percent(equity::max_drawdown(&curve)));
}

fn print_strategies(trades: &[Trade]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(["Strategy", "Trades", "Wins", "Losses", "Win rate", "Avg P&L", "Total P&L"]);
    for row in grouping::by_strategy(trades) {
        table.add_row([
            row.strategy,
            row.count.to_string(),
            row.wins.to_string(),
            row.losses.to_string(),
            percent(row.win_rate),
            money(row.avg_pnl),
            money(row.total_pnl),
        ]);
    }
    println!("{table}");
}

fn print_grades(trades: &[Trade]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(["Grade", "Trades", "Wins", "Losses", "Win rate", "Avg P&L", "Total P&L"]);
    for row in grouping::by_setup_grade(trades) {
        table.add_row([
            row.grade,
            row.count.to_string(),
            row.wins.to_string(),
            row.losses.to_string(),
            percent(row.win_rate),
            money(row.avg_pnl),
            money(row.total_pnl),
        ]);
    }
    println!("{table}");
}

fn print_mistakes(trades: &[Trade], days: i64) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(["Mistake", "Frequency", "Share", "Total cost", "Avg cost"]);
    for row in grouping::by_mistake(trades) {
        table.add_row([
            row.mistake,
            row.frequency.to_string(),
            percent(row.percentage),
            money(row.total_cost),
            money(row.avg_cost),
        ]);
    }
    println!("Mistakes\n{table}");

    let since = Utc::now().date_naive() - Duration::days(days);
    let mut trends = Table::new();
    trends
        .load_preset(UTF8_FULL)
        .set_header(["Date", "Mistake", "Count"]);
    for row in grouping::mistake_trends(trades, since) {
        trends.add_row([row.date.to_string(), row.mistake, row.count.to_string()]);
    }
    println!("Trend (last {days} days)\n{trends}");
}

fn print_calendar(trades: &[Trade], from: NaiveDate, to: NaiveDate) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(["Date", "Trades", "Wins", "Losses", "P&L"]);
    for day in grouping::calendar_days(trades, from, to) {
        table.add_row([
            day.date.to_string(),
            day.trades.to_string(),
            day.wins.to_string(),
            day.losses.to_string(),
            money(day.pnl),
        ]);
    }
    println!("{table}");
}

fn print_trades(trades: &[Trade]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header([
        "Id", "Timestamp", "Session", "Strategy", "Result", "P&L", "R:R", "Grade", "Mistake",
    ]);
    for trade in trades {
        table.add_row([
            trade.id.to_string(),
            trade.timestamp.to_rfc3339(),
            trade.session.clone(),
            trade.strategy.clone(),
            trade.result.to_string(),
            money(trade.pnl),
            trade.rr.clone(),
            trade
                .setup_grade
                .map(|g| g.label().to_string())
                .unwrap_or_else(|| "-".to_string()),
            trade.mistake.clone(),
        ]);
    }
    println!("{table}");
}

/// Formats currency with an explicit sign, matching the journal's display style.
fn money(amount: Decimal) -> String {
    if amount >= Decimal::ZERO {
        format!("+${amount}")
    } else {
        format!("-${}", amount.abs())
    }
}

fn percent(value: Decimal) -> String {
    format!("{value}%")
}
