use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use recruitment_admin::{
    config::{get_config, init_config},
    dto::{
        interview_dto::InterviewForm,
        position_dto::PositionForm,
        selection_dto::{AddSelectedCandidatePayload, JoiningLetterForm, OfferLetterForm},
    },
    models::{
        application::{ApplicationListQuery, ApplicationStatus},
        interview::{InterviewListQuery, InterviewType},
        matching::MatchingFilter,
        position::{JobType, PositionFilter},
        selected_candidate::{SelectedCandidateQuery, SelectionStatus},
        settings::MatchingCriteria,
    },
    utils::time::{display_date, parse_date, parse_time},
    views::{
        dialog::{AssumeYes, TerminalPrompter},
        matching_results::ExportFormat,
        notifier::ConsoleNotifier,
        Notifier, Prompter,
    },
    AdminApp,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recruitment-admin", version, about = "Admin console for the recruitment backend")]
struct Cli {
    /// Log requests and responses at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer "yes" to every confirmation.
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Exchange credentials for a session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    Logout,
    #[command(subcommand)]
    Positions(PositionCmd),
    #[command(subcommand)]
    Applications(ApplicationCmd),
    #[command(subcommand)]
    Interviews(InterviewCmd),
    #[command(subcommand)]
    Matching(MatchingCmd),
    #[command(subcommand)]
    Selected(SelectedCmd),
    #[command(subcommand)]
    Settings(SettingsCmd),
    #[command(subcommand)]
    Access(AccessCmd),
}

#[derive(Subcommand)]
enum PositionCmd {
    List {
        #[arg(long, default_value = "all")]
        status: PositionFilter,
    },
    Create(PositionArgs),
    Update {
        id: String,
        #[command(flatten)]
        form: PositionArgs,
    },
    Toggle { id: String },
    Delete { id: String },
}

#[derive(Args)]
struct PositionArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    department: String,
    #[arg(long)]
    location: String,
    #[arg(long, default_value = "full-time")]
    job_type: JobType,
    #[arg(long, default_value_t = 0.0)]
    min_experience: f64,
    #[arg(long, default_value_t = 0.0)]
    relevant_experience: f64,
    #[arg(long)]
    description: String,
    #[arg(long)]
    salary_range: Option<String>,
    #[arg(long = "requirement")]
    requirements: Vec<String>,
}

impl From<PositionArgs> for PositionForm {
    fn from(args: PositionArgs) -> Self {
        let mut form = PositionForm::new(args.title, args.department, args.location);
        form.job_type = args.job_type;
        form.minimum_experience = args.min_experience;
        form.relevant_experience = args.relevant_experience;
        form.description = args.description;
        form.salary_range = args.salary_range;
        form.requirements = args.requirements;
        form
    }
}

#[derive(Subcommand)]
enum ApplicationCmd {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        status: Option<ApplicationStatus>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        /// Keep refreshing until Ctrl-C.
        #[arg(long)]
        watch: bool,
    },
    Show { id: String },
    Status { id: String, status: ApplicationStatus },
    Resume {
        id: String,
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    Stats,
}

#[derive(Subcommand)]
enum InterviewCmd {
    List {
        #[arg(long)]
        date: Option<String>,
    },
    Schedule {
        application_id: String,
        #[arg(long)]
        position: Option<String>,
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,
        #[arg(long, value_parser = time_arg)]
        time: Option<NaiveTime>,
        #[arg(long, default_value_t = 60)]
        duration: u32,
        #[arg(long = "type", default_value = "video")]
        interview_type: InterviewType,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Directory user id; repeatable.
        #[arg(long = "user")]
        users: Vec<String>,
        /// Ad-hoc interviewer as `Name <email>`; repeatable.
        #[arg(long = "interviewer")]
        interviewers: Vec<String>,
    },
    Reschedule {
        id: String,
        #[arg(long, value_parser = date_arg)]
        date: NaiveDate,
        #[arg(long, value_parser = time_arg)]
        time: NaiveTime,
    },
    Cancel { id: String },
    Complete { id: String },
    Remind { id: String },
    Stats,
}

#[derive(Subcommand)]
enum MatchingCmd {
    Results {
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        min_score: Option<f64>,
        #[arg(long)]
        shortlisted_only: bool,
        #[arg(long)]
        export: Option<ExportFormat>,
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    Shortlisted {
        #[arg(long)]
        position: Option<String>,
    },
    Run {
        #[arg(long)]
        position: Option<String>,
    },
}

#[derive(Args)]
struct OfferArgs {
    #[arg(long)]
    designation: String,
    #[arg(long)]
    salary: String,
    #[arg(long)]
    joining_date: NaiveDate,
    #[arg(long)]
    valid_until: Option<NaiveDate>,
    #[arg(long)]
    reporting_manager: Option<String>,
    #[arg(long)]
    work_location: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl From<OfferArgs> for OfferLetterForm {
    fn from(args: OfferArgs) -> Self {
        OfferLetterForm {
            designation: args.designation,
            salary: args.salary,
            joining_date: args.joining_date,
            offer_valid_until: args.valid_until,
            reporting_manager: args.reporting_manager,
            work_location: args.work_location,
            additional_notes: args.notes,
        }
    }
}

#[derive(Subcommand)]
enum SelectedCmd {
    List {
        #[arg(long)]
        status: Option<SelectionStatus>,
    },
    Add {
        application_id: String,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    Status { id: String, status: SelectionStatus },
    Remove { id: String },
    Documents { candidate_id: String },
    Verify { document_id: String },
    Reject { document_id: String },
    DeleteDocument { document_id: String },
    Upload {
        candidate_id: String,
        document_type: String,
        path: PathBuf,
    },
    Download {
        document_id: String,
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Send the same offer letter to one or more candidates.
    SendOffer {
        #[arg(required = true)]
        ids: Vec<String>,
        #[command(flatten)]
        offer: OfferArgs,
    },
    JoiningLetter {
        id: String,
        #[arg(long)]
        joining_date: NaiveDate,
        #[arg(long)]
        reporting_time: String,
        #[arg(long)]
        reporting_address: String,
        #[arg(long)]
        reporting_manager: Option<String>,
        #[arg(long = "bring")]
        documents_to_bring: Vec<String>,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand)]
enum SettingsCmd {
    EmailShow,
    EmailPresets,
    EmailToggle { id: String },
    EmailTest,
    EmailSendTest { to: String },
    Templates,
    TemplateReset { template_type: String },
    TemplateDelete { template_type: String },
    AiShow,
    AiWeights {
        #[arg(long)]
        skills: u32,
        #[arg(long)]
        experience: u32,
        #[arg(long)]
        education: u32,
        #[arg(long)]
        relevance: u32,
    },
    AiTest,
    RingAiShow,
    RingAiTestCall { phone_number: String },
    IntegrationsShow,
    IntegrationsTestEmail { to: String },
    GoogleAuthUrl,
    GoogleCallback { code: String },
    HomeShow,
    HomeReset,
}

#[derive(Subcommand)]
enum AccessCmd {
    Roles,
    /// Flip one module/action cell of a role's permission grid.
    Grant {
        role_id: String,
        module: String,
        action: String,
    },
    DeleteRole { role_id: String },
    Users,
    AssignRole { user_id: String, role_id: String },
    DeleteUser { user_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "recruitment_admin=debug"
    } else {
        "recruitment_admin=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let logs = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        logs.json().init();
    } else {
        logs.init();
    }

    init_config().context("failed to load configuration")?;
    let config = get_config()?;

    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let prompter: Arc<dyn Prompter> = if cli.yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(TerminalPrompter)
    };
    let app = AdminApp::new(config, AdminApp::token_store(config), notifier, prompter)?;
    info!(api = %config.api_base_url, "admin console ready");

    match cli.command {
        Command::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .interact()?,
            };
            app.access_control().login(&email, &password).await?;
        }
        Command::Logout => app.access_control().logout()?,
        Command::Positions(cmd) => run_positions(&app, cmd).await?,
        Command::Applications(cmd) => run_applications(&app, cmd).await?,
        Command::Interviews(cmd) => run_interviews(&app, cmd).await?,
        Command::Matching(cmd) => run_matching(&app, cmd).await?,
        Command::Selected(cmd) => run_selected(&app, cmd).await?,
        Command::Settings(cmd) => run_settings(&app, cmd).await?,
        Command::Access(cmd) => run_access(&app, cmd).await?,
    }

    Ok(())
}

async fn run_positions(app: &AdminApp, cmd: PositionCmd) -> anyhow::Result<()> {
    let mut view = app.position_manager();
    match cmd {
        PositionCmd::List { status } => {
            for p in view.load(status).await? {
                println!(
                    "{}  [{}]  {} / {} / {}  ({} applications)",
                    p.id,
                    p.status,
                    p.title,
                    p.department,
                    p.location,
                    p.applications_count.unwrap_or(0)
                );
            }
        }
        PositionCmd::Create(args) => view.create(args.into()).await?,
        PositionCmd::Update { id, form } => view.update(&id, form.into()).await?,
        PositionCmd::Toggle { id } => view.toggle_status(&id).await?,
        PositionCmd::Delete { id } => {
            view.delete(&id).await?;
        }
    }
    Ok(())
}

async fn run_applications(app: &AdminApp, cmd: ApplicationCmd) -> anyhow::Result<()> {
    let mut view = app.application_list();
    match cmd {
        ApplicationCmd::List {
            search,
            position,
            status,
            page,
            limit,
            watch,
        } => {
            let query = ApplicationListQuery {
                search,
                position,
                status,
                page,
                limit,
            };
            print_applications(view.load(query).await?);
            if watch {
                let poller = view.watch(get_config()?.poll_interval, |page| {
                    println!("-- refreshed --");
                    print_applications(&page);
                });
                tokio::signal::ctrl_c().await?;
                poller.stop().await;
            }
        }
        ApplicationCmd::Show { id } => {
            let details = view.details(&id).await?;
            let a = &details.application;
            println!("{} <{}>  [{}]", a.full_name, a.email, a.status);
            println!("Position: {}", a.position_title().unwrap_or("-"));
            println!("Applied:  {}", display_date(a.created_at));
            if let Some(url) = &details.photo_url {
                println!("Photo:    {}", url);
            }
            if let Some(url) = &details.resume_url {
                println!("Resume:   {}", url);
            }
        }
        ApplicationCmd::Status { id, status } => view.update_status(&id, status).await?,
        ApplicationCmd::Resume { id, dir } => {
            let dir = dir.unwrap_or_else(|| get_config().map(|c| c.download_dir.clone()).unwrap_or_default());
            let path = view.download_resume(&id, &dir).await?;
            println!("{}", path.display());
        }
        ApplicationCmd::Stats => {
            let stats = view.dashboard_stats().await?;
            println!(
                "total {}  pending {}  reviewed {}  shortlisted {}  selected {}  rejected {}",
                stats.total, stats.pending, stats.reviewed, stats.shortlisted, stats.selected, stats.rejected
            );
        }
    }
    Ok(())
}

fn print_applications(page: &recruitment_admin::models::application::ApplicationPage) {
    for a in &page.items {
        println!(
            "{}  [{}]  {} <{}>  {}",
            a.id,
            a.status,
            a.full_name,
            a.email,
            a.position_title().unwrap_or("-")
        );
    }
    println!(
        "page {}/{} ({} total)",
        page.pagination.page, page.pagination.pages, page.pagination.total
    );
}

async fn run_interviews(app: &AdminApp, cmd: InterviewCmd) -> anyhow::Result<()> {
    let view = app.interview_scheduler();
    match cmd {
        InterviewCmd::List { date } => {
            let query = InterviewListQuery {
                date,
                ..Default::default()
            };
            for i in view.list(&query).await? {
                println!(
                    "{}  [{}]  {} {}  {}  {}",
                    i.id,
                    i.status,
                    i.scheduled_date.as_deref().unwrap_or("-"),
                    i.scheduled_time.as_deref().unwrap_or("-"),
                    i.interview_type,
                    i.candidate_name().unwrap_or("-")
                );
            }
        }
        InterviewCmd::Schedule {
            application_id,
            position,
            date,
            time,
            duration,
            interview_type,
            location,
            notes,
            users,
            interviewers,
        } => {
            let mut form = InterviewForm::new(application_id);
            form.position_id = position;
            form.date = date;
            form.time = time;
            form.duration = duration;
            form.interview_type = interview_type;
            form.location = location;
            form.notes = notes;
            if !users.is_empty() {
                let directory = view.interviewer_directory().await?;
                for id in &users {
                    let user = directory
                        .iter()
                        .find(|u| &u.id == id)
                        .with_context(|| format!("no active user with id {}", id))?;
                    form.add_directory_interviewer(user);
                }
            }
            for raw in &interviewers {
                let (name, email) = parse_interviewer(raw)?;
                if let Err(err) = form.add_custom_interviewer(&name, &email) {
                    app.notifier.error(&err.user_message());
                    return Err(err.into());
                }
            }
            let scheduled = view.schedule(&form).await?;
            if let Some(link) = &scheduled.interview.meeting_link {
                println!("Meeting link: {}", link);
            }
        }
        InterviewCmd::Reschedule { id, date, time } => view.reschedule(&id, date, time).await?,
        InterviewCmd::Cancel { id } => {
            view.cancel(&id).await?;
        }
        InterviewCmd::Complete { id } => {
            view.complete(&id).await?;
        }
        InterviewCmd::Remind { id } => view.remind(&id).await?,
        InterviewCmd::Stats => {
            let stats = view.stats().await?;
            println!(
                "total {}  scheduled {}  completed {}  cancelled {}  today {}  upcoming {}",
                stats.total, stats.scheduled, stats.completed, stats.cancelled, stats.today, stats.upcoming
            );
        }
    }
    Ok(())
}

fn date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).map_err(|e| e.user_message())
}

fn time_arg(raw: &str) -> Result<NaiveTime, String> {
    parse_time(raw).map_err(|e| e.user_message())
}

/// `Jane Roe <jane@corp.io>`
fn parse_interviewer(raw: &str) -> anyhow::Result<(String, String)> {
    let (name, rest) = raw
        .split_once('<')
        .with_context(|| format!("expected `Name <email>`, got `{}`", raw))?;
    let email = rest.trim_end().trim_end_matches('>');
    Ok((name.trim().to_string(), email.trim().to_string()))
}

async fn run_matching(app: &AdminApp, cmd: MatchingCmd) -> anyhow::Result<()> {
    let mut view = app.matching_results();
    match cmd {
        MatchingCmd::Results {
            position,
            min_score,
            shortlisted_only,
            export,
            dir,
        } => {
            let filter = MatchingFilter {
                position,
                min_score,
                shortlisted_only,
            };
            for r in view.load(filter).await? {
                println!(
                    "{}  {:>5.1}  {}  {}{}",
                    r.id,
                    r.scores.overall,
                    r.candidate().map(|c| c.full_name.as_str()).unwrap_or("-"),
                    r.position_title().unwrap_or("-"),
                    if r.is_shortlisted { "  *shortlisted*" } else { "" }
                );
            }
            if let Some(format) = export {
                let dir = dir.unwrap_or_else(|| get_config().map(|c| c.download_dir.clone()).unwrap_or_default());
                view.export(format, &dir).await?;
            }
        }
        MatchingCmd::Shortlisted { position } => {
            for r in view.shortlisted(position.as_deref()).await? {
                println!(
                    "{}  {:>5.1}  {}",
                    r.id,
                    r.scores.overall,
                    r.candidate().map(|c| c.full_name.as_str()).unwrap_or("-")
                );
            }
        }
        MatchingCmd::Run { position } => view.match_now(position.as_deref()).await?,
    }
    Ok(())
}

async fn run_selected(app: &AdminApp, cmd: SelectedCmd) -> anyhow::Result<()> {
    let view = app.selected_candidates();
    let download_dir = get_config()?.download_dir.clone();
    match cmd {
        SelectedCmd::List { status } => {
            let query = SelectedCandidateQuery {
                status,
                ..Default::default()
            };
            for row in view.list(&query).await? {
                let docs = row
                    .documents
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "documents unavailable".to_string());
                println!(
                    "{}  [{}]  {}  {}  {}",
                    row.candidate.id,
                    row.candidate.status,
                    row.candidate.candidate_name(),
                    row.candidate.position_title().unwrap_or("-"),
                    docs
                );
            }
        }
        SelectedCmd::Add {
            application_id,
            position,
            notes,
        } => {
            let payload = AddSelectedCandidatePayload {
                application_id,
                position_id: position,
                notes,
            };
            view.add_selected(&payload).await?;
        }
        SelectedCmd::Status { id, status } => view.update_status(&id, status).await?,
        SelectedCmd::Remove { id } => {
            view.remove(&id).await?;
        }
        SelectedCmd::Documents { candidate_id } => {
            for d in view.documents(&candidate_id).await? {
                println!(
                    "{}  {}  [{}]  {}{}",
                    d.id,
                    d.document_type,
                    d.status,
                    d.file_name.as_deref().unwrap_or("-"),
                    d.rejection_reason
                        .as_deref()
                        .map(|r| format!("  ({})", r))
                        .unwrap_or_default()
                );
            }
        }
        SelectedCmd::Verify { document_id } => view.verify(&document_id).await?,
        SelectedCmd::Reject { document_id } => {
            view.reject(&document_id).await?;
        }
        SelectedCmd::DeleteDocument { document_id } => {
            view.delete_document(&document_id).await?;
        }
        SelectedCmd::Upload {
            candidate_id,
            document_type,
            path,
        } => view.upload(&candidate_id, &document_type, &path).await?,
        SelectedCmd::Download { document_id, dir } => {
            let path = view
                .download(&document_id, &dir.unwrap_or(download_dir))
                .await?;
            println!("{}", path.display());
        }
        SelectedCmd::SendOffer { ids, offer } => {
            let offer: OfferLetterForm = offer.into();
            if ids.len() == 1 {
                view.send_offer(&ids[0], &offer).await?;
            } else {
                view.bulk_send_offers(&ids, &offer).await?;
            }
        }
        SelectedCmd::JoiningLetter {
            id,
            joining_date,
            reporting_time,
            reporting_address,
            reporting_manager,
            documents_to_bring,
            notes,
        } => {
            let letter = JoiningLetterForm {
                joining_date,
                reporting_time,
                reporting_address,
                reporting_manager,
                documents_to_bring,
                additional_notes: notes,
            };
            view.send_joining_letter(&id, &letter).await?;
        }
    }
    Ok(())
}

async fn run_settings(app: &AdminApp, cmd: SettingsCmd) -> anyhow::Result<()> {
    let view = app.settings();
    match cmd {
        SettingsCmd::EmailShow => match view.email_config().await? {
            Some(c) => println!(
                "{}:{} secure={} user={} from={} active={}",
                c.host,
                c.port,
                c.secure,
                c.username,
                c.from_email.as_deref().unwrap_or("-"),
                c.is_active
            ),
            None => println!("No email configuration"),
        },
        SettingsCmd::EmailPresets => {
            for p in view.email_presets().await? {
                println!("{}  {}:{} secure={}", p.name, p.host, p.port, p.secure);
            }
        }
        SettingsCmd::EmailToggle { id } => view.toggle_email_config(&id).await?,
        SettingsCmd::EmailTest => {
            let config = view
                .email_config()
                .await?
                .context("no email configuration to test")?;
            view.test_email_connection(&config).await?;
        }
        SettingsCmd::EmailSendTest { to } => {
            view.send_test_email(&to).await?;
        }
        SettingsCmd::Templates => {
            for t in view.email_templates().await? {
                println!("{}  {}  (active={})", t.template_type, t.subject, t.is_active);
            }
        }
        SettingsCmd::TemplateReset { template_type } => {
            view.reset_email_template(&template_type).await?;
        }
        SettingsCmd::TemplateDelete { template_type } => {
            view.delete_email_template(&template_type).await?;
        }
        SettingsCmd::AiShow => {
            let c = view.ai_config().await?;
            let w = c.matching_criteria;
            println!(
                "model={} threshold={} auto_match={} weights skills={} experience={} education={} relevance={}",
                c.model.as_deref().unwrap_or("-"),
                c.shortlist_threshold,
                c.auto_match,
                w.skills,
                w.experience,
                w.education,
                w.relevance
            );
        }
        SettingsCmd::AiWeights {
            skills,
            experience,
            education,
            relevance,
        } => {
            let mut config = view.ai_config().await?;
            config.api_key = None;
            config.matching_criteria = MatchingCriteria {
                skills,
                experience,
                education,
                relevance,
            };
            view.save_ai_config(&config).await?;
        }
        SettingsCmd::AiTest => {
            view.test_ai().await?;
        }
        SettingsCmd::RingAiShow => {
            let c = view.ring_ai_config().await?;
            println!(
                "enabled={} caller={} window={}-{} max_attempts={}",
                c.enabled,
                c.caller_id.as_deref().unwrap_or("-"),
                c.call_window_start.as_deref().unwrap_or("-"),
                c.call_window_end.as_deref().unwrap_or("-"),
                c.max_attempts.unwrap_or(0)
            );
        }
        SettingsCmd::RingAiTestCall { phone_number } => {
            view.ring_ai_test_call(&phone_number).await?;
        }
        SettingsCmd::IntegrationsShow => {
            let c = view.integrations().await?;
            println!(
                "google connected={} calendar={} auto_meet={}  email enabled={}",
                c.google.connected,
                c.google.calendar_id.as_deref().unwrap_or("-"),
                c.google.auto_generate_meet_link,
                c.email.enabled
            );
        }
        SettingsCmd::IntegrationsTestEmail { to } => {
            view.integration_test_email(&to).await?;
        }
        SettingsCmd::GoogleAuthUrl => println!("{}", view.google_auth_url().await?),
        SettingsCmd::GoogleCallback { code } => {
            view.google_callback(&code).await?;
        }
        SettingsCmd::HomeShow => {
            let c = view.home_content().await?;
            println!("{}\n{}", c.hero_title, c.hero_subtitle);
            for f in &c.features {
                println!("- {}: {}", f.title, f.description);
            }
        }
        SettingsCmd::HomeReset => {
            view.reset_home_content().await?;
        }
    }
    Ok(())
}

async fn run_access(app: &AdminApp, cmd: AccessCmd) -> anyhow::Result<()> {
    let view = app.access_control();
    match cmd {
        AccessCmd::Roles => {
            for r in view.roles().await? {
                let grants: Vec<String> = r
                    .permissions
                    .iter()
                    .map(|p| format!("{}:{}", p.module, p.actions.join("/")))
                    .collect();
                println!("{}  {}  {}", r.id, r.name, grants.join(", "));
            }
        }
        AccessCmd::Grant {
            role_id,
            module,
            action,
        } => {
            let role = view
                .roles()
                .await?
                .into_iter()
                .find(|r| r.id == role_id)
                .with_context(|| format!("no role with id {}", role_id))?;
            let mut matrix = view.permission_matrix(Some(&role)).await?;
            let granted = matrix.toggle(&module, &action)?;
            view.save_role(Some(&role.id), &role.name, role.description.clone(), &matrix)
                .await?;
            println!(
                "{}:{} is now {}",
                module,
                action,
                if granted { "granted" } else { "revoked" }
            );
        }
        AccessCmd::DeleteRole { role_id } => {
            let role = view
                .roles()
                .await?
                .into_iter()
                .find(|r| r.id == role_id)
                .with_context(|| format!("no role with id {}", role_id))?;
            view.delete_role(&role).await?;
        }
        AccessCmd::Users => {
            for u in view.users().await? {
                println!(
                    "{}  {} <{}>  role={}  active={}",
                    u.id,
                    u.name,
                    u.email,
                    u.role.as_ref().map(|r| r.label()).unwrap_or("-"),
                    u.is_active
                );
            }
        }
        AccessCmd::AssignRole { user_id, role_id } => view.assign_role(&user_id, &role_id).await?,
        AccessCmd::DeleteUser { user_id } => {
            let user = view
                .users()
                .await?
                .into_iter()
                .find(|u| u.id == user_id)
                .with_context(|| format!("no user with id {}", user_id))?;
            view.delete_user(&user).await?;
        }
    }
    Ok(())
}
