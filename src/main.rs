//! @ai:module:intent CLI for the job tracker
//! @ai:module:layer presentation

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use job_tracker::{
    config::TrackerConfig,
    metrics::{MetricsAggregator, PortfolioSummary, ProjectOverview},
    project::{
        lenient::parse_date, ChangeOrderInput, FuelPrices, FuelType, HoursInput, InvoiceInput,
        InvoiceStatus, MaterialInput, ProjectDetails, ProjectEdit, ProjectId, ProjectStatus,
        TeamMemberInput, TravelInput,
    },
    report::{format_cents, format_currency, format_signed_currency, ReportGenerator},
    service::{NewProject, ProjectService},
    store::{JsonFileStore, ProjectStore},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "job-tracker")]
#[command(about = "Track construction project budgets, labor, materials and invoices")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "job-tracker.toml")]
        output: PathBuf,
    },

    /// Create a project
    New {
        name: String,

        /// Agreed contract price
        #[arg(short, long)]
        price: f64,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long, default_value = "Scheduling")]
        status: ProjectStatus,
    },

    /// Update a project's name, price, description or status
    Update {
        project: ProjectId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<f64>,

        /// New description; pass an empty string to clear it
        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        status: Option<ProjectStatus>,
    },

    /// List projects
    List,

    /// Show budget overview for a project
    Show { project: ProjectId },

    /// Write JSON and Markdown reports for a project
    Report {
        project: ProjectId,

        /// Output directory (defaults to report.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete a project
    Delete { project: ProjectId },

    /// Import projects exported from the browser tracker
    Import { file: PathBuf },

    /// Rewrite every project file, folding legacy payments into invoices
    Upgrade,

    /// Totals across all projects
    Portfolio,

    /// Manage team members
    #[command(subcommand)]
    Member(MemberCommand),

    /// Log or remove hours
    #[command(subcommand)]
    Hours(HoursCommand),

    /// Manage change orders
    #[command(subcommand)]
    ChangeOrder(ChangeOrderCommand),

    /// Manage purchased materials
    #[command(subcommand)]
    Material(MaterialCommand),

    /// Manage travel expenses
    #[command(subcommand)]
    Travel(TravelCommand),

    /// Manage fuel price settings
    #[command(subcommand)]
    Fuel(FuelCommand),

    /// Manage invoices
    #[command(subcommand)]
    Invoice(InvoiceCommand),
}

#[derive(Subcommand)]
enum MemberCommand {
    Add {
        project: ProjectId,
        name: String,
        #[arg(long)]
        rate: f64,
        #[arg(long, default_value = "")]
        role: String,
    },
    /// Removes the member and their logged hours
    Remove { project: ProjectId, member: u64 },
}

#[derive(Subcommand)]
enum HoursCommand {
    Log {
        project: ProjectId,
        member: u64,
        hours: f64,
        /// Date worked (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },
    Remove { project: ProjectId, entry: u64 },
}

#[derive(Subcommand)]
enum ChangeOrderCommand {
    Add {
        project: ProjectId,
        description: String,
        /// Signed price adjustment
        #[arg(allow_negative_numbers = true)]
        price: f64,
    },
    Remove { project: ProjectId, entry: u64 },
}

#[derive(Subcommand)]
enum MaterialCommand {
    Add {
        project: ProjectId,
        name: String,
        cost: f64,
        #[arg(long, default_value = "1")]
        quantity: String,
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },
    Remove { project: ProjectId, entry: u64 },
}

#[derive(Subcommand)]
enum TravelCommand {
    Add {
        project: ProjectId,
        member: u64,
        #[arg(long)]
        miles: f64,
        #[arg(long)]
        mpg: f64,
        #[arg(long, default_value = "gas")]
        fuel: FuelType,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },
    Remove { project: ProjectId, entry: u64 },
}

#[derive(Subcommand)]
enum FuelCommand {
    /// Set price per gallon; existing trips keep their stored cost
    Set {
        project: ProjectId,
        #[arg(long)]
        gas: f64,
        #[arg(long)]
        diesel: f64,
    },
}

#[derive(Subcommand)]
enum InvoiceCommand {
    Add {
        project: ProjectId,
        amount: f64,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "Pending")]
        status: InvoiceStatus,
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },
    Status {
        project: ProjectId,
        invoice: u64,
        status: InvoiceStatus,
    },
    Remove { project: ProjectId, entry: u64 },
}

type Service = ProjectService<JsonFileStore, MetricsAggregator>;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("job_tracker=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Init { output } = &cli.command {
        return init_config(output);
    }

    let config = TrackerConfig::load_or_default(cli.config.as_deref())?;
    let service = open_service(&config);

    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::New {
            name,
            price,
            description,
            status,
        } => {
            let project = service.create_project(NewProject {
                name,
                agreed_price: price,
                description,
                status,
            })?;
            println!("Created project {} ({})", project.id, project.name);
            Ok(())
        }
        Commands::Update {
            project,
            name,
            price,
            description,
            status,
        } => update_details(&service, project, name, price, description, status),
        Commands::List => list_projects(&service),
        Commands::Show { project } => {
            print_overview(&service.overview(project)?);
            Ok(())
        }
        Commands::Report { project, output } => {
            let output = output.unwrap_or_else(|| config.report.output_dir.clone());
            let paths = ReportGenerator::new().generate_all(&service.overview(project)?, &output)?;

            for path in paths {
                println!("Wrote {}", path.display());
            }
            Ok(())
        }
        Commands::Delete { project } => {
            service.delete(project)?;
            println!("Deleted project {}", project);
            Ok(())
        }
        Commands::Import { file } => {
            let projects = service.store().import(&file)?;
            println!("Imported {} projects", projects.len());
            Ok(())
        }
        Commands::Upgrade => upgrade_all(&service),
        Commands::Portfolio => {
            print_portfolio(&service.portfolio()?);
            Ok(())
        }
        Commands::Member(cmd) => run_member(&service, cmd),
        Commands::Hours(cmd) => run_hours(&service, cmd),
        Commands::ChangeOrder(cmd) => run_change_order(&service, cmd),
        Commands::Material(cmd) => run_material(&service, cmd),
        Commands::Travel(cmd) => run_travel(&service, cmd),
        Commands::Fuel(cmd) => run_fuel(&service, cmd),
        Commands::Invoice(cmd) => run_invoice(&service, cmd),
    }
}

/// @ai:intent Wire the file store and aggregator from configuration
/// @ai:effects pure
fn open_service(config: &TrackerConfig) -> Service {
    ProjectService::new(
        JsonFileStore::new(&config.store.data_dir),
        MetricsAggregator::new(),
    )
    .with_default_fuel_prices(config.fuel.prices())
}

/// @ai:intent Parse a YYYY-MM-DD date argument
/// @ai:effects pure
fn date_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("expected a YYYY-MM-DD date, got '{}'", s))
}

fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: &std::path::Path) -> Result<()> {
    let config = TrackerConfig::default();
    config.save(output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Apply an edit and report the result
/// @ai:effects fs:read, fs:write
fn apply(service: &Service, project: ProjectId, edit: ProjectEdit, done: &str) -> Result<()> {
    let updated = service.edit(project, edit)?;
    println!("{} ({})", done, updated.name);
    Ok(())
}

/// @ai:intent Merge provided fields over the stored project details
/// @ai:effects fs:read, fs:write
fn update_details(
    service: &Service,
    id: ProjectId,
    name: Option<String>,
    price: Option<f64>,
    description: Option<String>,
    status: Option<ProjectStatus>,
) -> Result<()> {
    let current = service.project(id)?;
    let details = ProjectDetails {
        name: name.unwrap_or(current.name),
        agreed_price: price.unwrap_or(current.agreed_price),
        description: description.or(current.description),
        status: status.unwrap_or(current.status),
    };

    apply(service, id, ProjectEdit::UpdateDetails(details), "Updated project")
}

fn run_member(service: &Service, cmd: MemberCommand) -> Result<()> {
    match cmd {
        MemberCommand::Add {
            project,
            name,
            rate,
            role,
        } => apply(
            service,
            project,
            ProjectEdit::AddTeamMember(TeamMemberInput {
                name,
                role,
                hourly_rate: rate,
            }),
            "Added team member",
        ),
        MemberCommand::Remove { project, member } => apply(
            service,
            project,
            ProjectEdit::RemoveTeamMember(member),
            "Removed team member",
        ),
    }
}

fn run_hours(service: &Service, cmd: HoursCommand) -> Result<()> {
    match cmd {
        HoursCommand::Log {
            project,
            member,
            hours,
            date,
        } => apply(
            service,
            project,
            ProjectEdit::LogHours(HoursInput {
                team_member_id: member,
                date: Some(date.unwrap_or_else(today)),
                hours,
            }),
            "Logged hours",
        ),
        HoursCommand::Remove { project, entry } => apply(
            service,
            project,
            ProjectEdit::RemoveHours(entry),
            "Removed hours entry",
        ),
    }
}

fn run_change_order(service: &Service, cmd: ChangeOrderCommand) -> Result<()> {
    match cmd {
        ChangeOrderCommand::Add {
            project,
            description,
            price,
        } => apply(
            service,
            project,
            ProjectEdit::AddChangeOrder(ChangeOrderInput { description, price }),
            "Added change order",
        ),
        ChangeOrderCommand::Remove { project, entry } => apply(
            service,
            project,
            ProjectEdit::RemoveChangeOrder(entry),
            "Removed change order",
        ),
    }
}

fn run_material(service: &Service, cmd: MaterialCommand) -> Result<()> {
    match cmd {
        MaterialCommand::Add {
            project,
            name,
            cost,
            quantity,
            date,
        } => apply(
            service,
            project,
            ProjectEdit::AddMaterial(MaterialInput {
                name,
                cost,
                quantity,
                date: Some(date.unwrap_or_else(today)),
            }),
            "Added material",
        ),
        MaterialCommand::Remove { project, entry } => apply(
            service,
            project,
            ProjectEdit::RemoveMaterial(entry),
            "Removed material",
        ),
    }
}

fn run_travel(service: &Service, cmd: TravelCommand) -> Result<()> {
    match cmd {
        TravelCommand::Add {
            project,
            member,
            miles,
            mpg,
            fuel,
            description,
            date,
        } => apply(
            service,
            project,
            ProjectEdit::AddTravelExpense(TravelInput {
                team_member_id: member,
                date: Some(date.unwrap_or_else(today)),
                miles,
                mpg,
                fuel_type: fuel,
                description,
            }),
            "Added travel expense",
        ),
        TravelCommand::Remove { project, entry } => apply(
            service,
            project,
            ProjectEdit::RemoveTravelExpense(entry),
            "Removed travel expense",
        ),
    }
}

fn run_fuel(service: &Service, cmd: FuelCommand) -> Result<()> {
    match cmd {
        FuelCommand::Set {
            project,
            gas,
            diesel,
        } => apply(
            service,
            project,
            ProjectEdit::SetFuelPrices(FuelPrices { gas, diesel }),
            "Updated fuel prices",
        ),
    }
}

fn run_invoice(service: &Service, cmd: InvoiceCommand) -> Result<()> {
    match cmd {
        InvoiceCommand::Add {
            project,
            amount,
            description,
            status,
            date,
        } => apply(
            service,
            project,
            ProjectEdit::AddInvoice(InvoiceInput {
                amount,
                date: Some(date.unwrap_or_else(today)),
                description,
                status,
            }),
            "Added invoice",
        ),
        InvoiceCommand::Status {
            project,
            invoice,
            status,
        } => apply(
            service,
            project,
            ProjectEdit::SetInvoiceStatus {
                id: invoice,
                status,
            },
            "Updated invoice status",
        ),
        InvoiceCommand::Remove { project, entry } => apply(
            service,
            project,
            ProjectEdit::RemoveInvoice(entry),
            "Removed invoice",
        ),
    }
}

/// @ai:intent Re-save every project so legacy payments are persisted as invoices
/// @ai:effects fs:read, fs:write
fn upgrade_all(service: &Service) -> Result<()> {
    let projects = service.projects()?;

    for project in &projects {
        service.store().put(project)?;
    }

    println!("Rewrote {} project files", projects.len());
    Ok(())
}

/// @ai:intent List projects with headline numbers
/// @ai:effects fs:read, io
fn list_projects(service: &Service) -> Result<()> {
    let projects = service.projects()?;

    println!("Projects ({}):", projects.len());
    println!();
    println!(
        "{:<15} {:<30} {:<28} {:>14}",
        "ID", "Name", "Status", "Agreed Price"
    );
    println!("{}", "-".repeat(90));

    for project in &projects {
        println!(
            "{:<15} {:<30} {:<28} {:>14}",
            project.id,
            project.name,
            project.status.as_str(),
            format_currency(project.agreed_price)
        );
    }

    Ok(())
}

/// @ai:intent Print the budget overview to the console
/// @ai:effects io
fn print_overview(overview: &ProjectOverview) {
    let project = &overview.project;
    let metrics = &overview.metrics;

    println!();
    println!("{} [{}]", project.name, project.status);
    println!("{}", "=".repeat(60));

    if let Some(description) = &project.description {
        println!("{}", description);
        println!();
    }

    let rows = [
        ("Original price:", format_currency(project.agreed_price)),
        ("Change orders:", format_signed_currency(metrics.total_change_orders)),
        ("Adjusted price:", format_currency(metrics.adjusted_price)),
        ("Materials cost:", format_currency(metrics.total_materials)),
        ("Labor cost:", format_currency(metrics.total_labor_cost)),
        ("Travel expenses:", format_cents(metrics.total_travel_expenses)),
        ("Remaining budget:", format_currency(metrics.remaining_budget)),
        ("Invoiced:", format_currency(metrics.total_invoices)),
        ("Invoices paid:", format_currency(metrics.total_invoices_paid)),
        ("Outstanding balance:", format_currency(metrics.outstanding_balance)),
    ];

    for (label, value) in rows {
        println!("{:<25} {:>20}", label, value);
    }

    if overview.members.is_empty() {
        println!();
        return;
    }

    println!();
    println!(
        "  {:<20} {:>10} {:>10} {:>12} {:>10}",
        "Team member", "Rate", "Hours", "Labor", "Travel"
    );
    println!("  {}", "-".repeat(66));

    for member in &overview.members {
        println!(
            "  {:<20} {:>10} {:>10.2} {:>12} {:>10}",
            member.name,
            format_currency(member.hourly_rate),
            member.total_hours,
            format_currency(member.labor_cost),
            format_cents(member.travel_cost)
        );
    }

    println!();
}

/// @ai:intent Print portfolio totals
/// @ai:effects io
fn print_portfolio(summary: &PortfolioSummary) {
    println!();
    println!("Portfolio ({} projects)", summary.project_count);
    println!("{}", "=".repeat(40));

    for entry in &summary.by_status {
        println!("{:<30} {:>8}", entry.status.as_str(), entry.count);
    }

    println!();
    println!(
        "{:<25} {:>14}",
        "Adjusted price:",
        format_currency(summary.total_adjusted_price)
    );
    println!(
        "{:<25} {:>14}",
        "Remaining budget:",
        format_currency(summary.total_remaining_budget)
    );
    println!(
        "{:<25} {:>14}",
        "Outstanding balance:",
        format_currency(summary.total_outstanding_balance)
    );
    println!();
}
