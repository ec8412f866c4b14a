//! Command-line interface definitions and handlers
//!
//! Clap argument structs live here next to their conversions into the core
//! parameter types, so core params stay free of clap attributes:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Playbook → Display → Renderer
//! ```
//!
//! Every handler renders the same markdown the MCP server returns; the
//! terminal renderer only decides whether it is styled.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use playbook_core::{
    display::{move_list_title, CreateResult, DeleteResult, UpdateResult},
    models::{MoveStatus, Outcome, RunMode},
    params::*,
    situation::{
        OfferClarity, ProofStrength, SalesMotion, Situation, Speed, TimeBudget, TrafficLevel,
    },
    Move, OperationStatus, Playbook, PlaybookError,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Wizard arguments
// ============================================================================

/// Answers to the situation questions, shared by `recommend`, `preflight`
/// and `launch`. Every answer is optional.
#[derive(Args, Default)]
pub struct SituationArgs {
    /// How fast results are needed, in days
    #[arg(long, help = "How fast you need results: 7, 14, 30 or 90 days")]
    pub speed: Option<Speed>,
    #[arg(long, help = "Hours per week you can spend on execution")]
    pub time_budget: Option<TimeBudgetArg>,
    #[arg(long)]
    pub sales_motion: Option<SalesMotionArg>,
    #[arg(long, help = "How much traffic you already get")]
    pub traffic: Option<TrafficArg>,
    #[arg(long, help = "How much social proof you have")]
    pub proof: Option<ProofArg>,
    #[arg(long, help = "How clear your offer is today")]
    pub offer_clarity: Option<OfferClarityArg>,
    #[arg(long, help = "Whether there is budget for paid ads (true or false)")]
    pub paid_budget: Option<bool>,
    #[arg(long, help = "The channel you are most comfortable with")]
    pub primary_channel: Option<String>,
}

impl From<SituationArgs> for Situation {
    fn from(val: SituationArgs) -> Self {
        Situation {
            speed_needed: val.speed,
            time_budget: val.time_budget.map(Into::into),
            sales_motion: val.sales_motion.map(Into::into),
            traffic: val.traffic.map(Into::into),
            proof_strength: val.proof.map(Into::into),
            offer_clarity: val.offer_clarity.map(Into::into),
            paid_budget: val.paid_budget,
            primary_channel: val.primary_channel,
        }
    }
}

/// Rank frameworks for a problem
#[derive(Args)]
pub struct RecommendArgs {
    #[arg(help = "Problem id from `pb problems`; nothing is ranked without one")]
    pub problem: Option<String>,
    #[command(flatten)]
    pub situation: SituationArgs,
    #[arg(short, long, help = "How many frameworks to show (default 4)")]
    pub limit: Option<usize>,
}

impl From<RecommendArgs> for Recommend {
    fn from(val: RecommendArgs) -> Self {
        Recommend {
            problem_id: val.problem,
            situation: val.situation.into(),
            limit: val.limit,
        }
    }
}

/// Assemble a plan draft from flags
///
/// The draft lives only for the duration of the command; nothing is stored
/// unless `launch` passes the gate.
#[derive(Args)]
pub struct LaunchArgs {
    #[arg(help = "Problem id from `pb problems`")]
    pub problem: String,
    #[arg(
        short,
        long,
        help = "Framework id; defaults to the top recommendation for the problem"
    )]
    pub framework: Option<String>,
    #[command(flatten)]
    pub situation: SituationArgs,
    #[arg(
        short,
        long = "input",
        value_name = "FIELD=VALUE",
        value_parser = parse_input,
        help = "Answer to one of the framework's offer fields (repeatable)"
    )]
    pub inputs: Vec<(String, String)>,
    #[arg(long = "disable-rule", value_name = "RULE", help = "Switch off an optional rule")]
    pub disabled_rules: Vec<String>,
    #[arg(
        long = "skip-action",
        value_name = "INDEX",
        help = "Leave out a daily action by its 0-based position"
    )]
    pub disabled_actions: Vec<usize>,
    #[arg(
        long = "remove-output",
        value_name = "OUTPUT",
        help = "Drop an optional deliverable"
    )]
    pub removed_outputs: Vec<String>,
    #[arg(
        short,
        long = "channel",
        value_delimiter = ',',
        help = "Channels to run the move on, comma-separated (at most two)"
    )]
    pub channels: Vec<String>,
    #[arg(long, help = "Current value of the KPI")]
    pub baseline: Option<f64>,
    #[arg(long, help = "Value of the KPI that counts as success")]
    pub target: Option<f64>,
    #[arg(short, long, help = "Name for the move; defaults to the framework name")]
    pub name: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD", help = "First day of the move; defaults to today")]
    pub start: Option<String>,
    #[arg(long, help = "Campaign to link the move to")]
    pub campaign: Option<u64>,
    #[arg(long, help = "Run the move as a team instead of solo")]
    pub team: bool,
    #[arg(long, help = "Start in 'generating' and wait for content before going active")]
    pub generate_content: bool,
}

impl From<LaunchArgs> for LaunchMove {
    fn from(val: LaunchArgs) -> Self {
        LaunchMove {
            problem_id: val.problem,
            framework_id: val.framework,
            situation: val.situation.into(),
            inputs: val.inputs.into_iter().collect(),
            disabled_rules: val.disabled_rules,
            disabled_actions: val.disabled_actions,
            removed_outputs: val.removed_outputs,
            channels: val.channels,
            baseline: val.baseline,
            target: val.target,
            name: val.name,
            start_date: val.start,
            campaign_id: val.campaign,
            run_mode: if val.team { RunMode::Team } else { RunMode::Solo },
            generate_content: val.generate_content,
        }
    }
}

fn parse_input(s: &str) -> std::result::Result<(String, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{s}'"));
    }
    Ok((field.to_string(), value.to_string()))
}

// ============================================================================
// Move arguments
// ============================================================================

#[derive(Args)]
pub struct ListMovesArgs {
    #[arg(short, long, help = "Only moves in this status")]
    pub status: Option<MoveStatus>,
    #[arg(short, long, help = "Only moves linked to this campaign")]
    pub campaign: Option<u64>,
    #[arg(short, long, help = "Include completed moves")]
    pub all: bool,
}

impl From<ListMovesArgs> for ListMoves {
    fn from(val: ListMovesArgs) -> Self {
        ListMoves {
            status: val.status,
            campaign_id: val.campaign,
            all: val.all,
        }
    }
}

#[derive(Args)]
pub struct MoveIdArgs {
    #[arg(help = "Unique identifier of the move")]
    pub id: u64,
}

impl From<MoveIdArgs> for Id {
    fn from(val: MoveIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Show one day of a move's checklist
#[derive(Args)]
pub struct TodayArgs {
    #[arg(help = "Unique identifier of the move")]
    pub id: u64,
    #[arg(short, long, help = "Day of the move to show; defaults to today's day")]
    pub day: Option<u32>,
}

impl From<TodayArgs> for TasksForDay {
    fn from(val: TodayArgs) -> Self {
        TasksForDay {
            id: val.id,
            day: val.day,
        }
    }
}

/// Close a move with an outcome
///
/// A completed move is read-only: tasks, proof, tracking and status can no
/// longer change.
#[derive(Args)]
pub struct CompleteMoveArgs {
    #[arg(help = "Unique identifier of the move to complete")]
    pub id: u64,
    #[arg(short, long, help = "How the move went")]
    pub outcome: OutcomeArg,
    #[arg(short, long, help = "What you learned, for the retrospective")]
    pub learning: Option<String>,
}

impl From<CompleteMoveArgs> for CompleteMove {
    fn from(val: CompleteMoveArgs) -> Self {
        CompleteMove {
            id: val.id,
            outcome: val.outcome.into(),
            learning: val.learning,
        }
    }
}

/// Link a move to a campaign, or unlink it with --detach
#[derive(Args)]
pub struct CampaignArgs {
    #[arg(help = "Unique identifier of the move")]
    pub id: u64,
    #[arg(
        required_unless_present = "detach",
        help = "Campaign to link the move to"
    )]
    pub campaign_id: Option<u64>,
    #[arg(long, conflicts_with = "campaign_id", help = "Unlink the move from its campaign")]
    pub detach: bool,
}

#[derive(Args)]
pub struct DeleteMoveArgs {
    #[arg(help = "Unique identifier of the move to permanently delete")]
    pub id: u64,
    #[arg(long, help = "Confirm the deletion; it cannot be undone")]
    pub confirm: bool,
}

impl From<DeleteMoveArgs> for DeleteMove {
    fn from(val: DeleteMoveArgs) -> Self {
        DeleteMove {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum MoveCommands {
    /// List moves (open ones by default)
    #[command(aliases = ["l", "ls"])]
    List(ListMovesArgs),
    /// Show a move with its checklist and tracking
    #[command(alias = "s")]
    Show(MoveIdArgs),
    /// Show the tasks scheduled for today (or another day)
    Today(TodayArgs),
    /// Start generating content for a pending move
    Start(MoveIdArgs),
    /// Make a pending or generating move active
    #[command(alias = "activate")]
    Ready(MoveIdArgs),
    /// Pause an active move
    Pause(MoveIdArgs),
    /// Resume a paused move
    Resume(MoveIdArgs),
    /// Complete a move with an outcome
    Complete(CompleteMoveArgs),
    /// Link a move to a campaign or unlink it
    Campaign(CampaignArgs),
    /// Permanently delete a move with its tasks and tracking
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteMoveArgs),
}

// ============================================================================
// Task and tracking arguments
// ============================================================================

#[derive(Args)]
pub struct TaskRefArgs {
    #[arg(help = "Unique identifier of the move")]
    pub move_id: u64,
    #[arg(help = "Unique identifier of the task")]
    pub task_id: u64,
}

impl From<TaskRefArgs> for TaskRef {
    fn from(val: TaskRefArgs) -> Self {
        TaskRef {
            move_id: val.move_id,
            task_id: val.task_id,
        }
    }
}

#[derive(Args)]
pub struct TaskDayArgs {
    pub move_id: u64,
    pub task_id: u64,
    #[arg(help = "New day, between 1 and the move's duration")]
    pub day: u32,
}

impl From<TaskDayArgs> for SetTaskDay {
    fn from(val: TaskDayArgs) -> Self {
        SetTaskDay {
            move_id: val.move_id,
            task_id: val.task_id,
            day: val.day,
        }
    }
}

/// Attach proof of work to a task
///
/// Needs --url, --note or both. Replaces any earlier proof.
#[derive(Args)]
pub struct ProofArgs {
    pub move_id: u64,
    pub task_id: u64,
    #[arg(short, long, help = "Link to the published work")]
    pub url: Option<String>,
    #[arg(short, long, help = "Free-form note")]
    pub note: Option<String>,
}

impl From<ProofArgs> for AttachProof {
    fn from(val: ProofArgs) -> Self {
        AttachProof {
            move_id: val.move_id,
            task_id: val.task_id,
            url: val.url,
            note: val.note,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Mark a task done, or not done if it already is
    #[command(alias = "x")]
    Toggle(TaskRefArgs),
    /// Move a task to another day
    Day(TaskDayArgs),
    /// Attach a link or note as proof of work
    Proof(ProofArgs),
}

#[derive(Args)]
pub struct TrackArgs {
    #[arg(help = "Unique identifier of the move")]
    pub move_id: u64,
    #[arg(help = "Observed value of the move's KPI")]
    pub value: f64,
}

impl From<TrackArgs> for LogTracking {
    fn from(val: TrackArgs) -> Self {
        LogTracking {
            move_id: val.move_id,
            value: val.value,
        }
    }
}

// ============================================================================
// Value enums
// ============================================================================

#[derive(Clone, Copy, ValueEnum)]
pub enum OutcomeArg {
    /// The move hit its target
    Won,
    /// Some movement, not enough
    Meh,
    /// Nothing worth repeating
    Failed,
}

impl From<OutcomeArg> for Outcome {
    fn from(val: OutcomeArg) -> Self {
        match val {
            OutcomeArg::Won => Outcome::Won,
            OutcomeArg::Meh => Outcome::Meh,
            OutcomeArg::Failed => Outcome::Failed,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TimeBudgetArg {
    /// Under two hours a week
    Low,
    /// Two to five hours a week
    Medium,
    /// More than five hours a week
    High,
}

impl From<TimeBudgetArg> for TimeBudget {
    fn from(val: TimeBudgetArg) -> Self {
        match val {
            TimeBudgetArg::Low => TimeBudget::Low,
            TimeBudgetArg::Medium => TimeBudget::Medium,
            TimeBudgetArg::High => TimeBudget::High,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SalesMotionArg {
    SelfServe,
    SalesLed,
    Hybrid,
}

impl From<SalesMotionArg> for SalesMotion {
    fn from(val: SalesMotionArg) -> Self {
        match val {
            SalesMotionArg::SelfServe => SalesMotion::SelfServe,
            SalesMotionArg::SalesLed => SalesMotion::SalesLed,
            SalesMotionArg::Hybrid => SalesMotion::Hybrid,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TrafficArg {
    None,
    Low,
    Medium,
    High,
}

impl From<TrafficArg> for TrafficLevel {
    fn from(val: TrafficArg) -> Self {
        match val {
            TrafficArg::None => TrafficLevel::None,
            TrafficArg::Low => TrafficLevel::Low,
            TrafficArg::Medium => TrafficLevel::Medium,
            TrafficArg::High => TrafficLevel::High,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ProofArg {
    None,
    Weak,
    Strong,
}

impl From<ProofArg> for ProofStrength {
    fn from(val: ProofArg) -> Self {
        match val {
            ProofArg::None => ProofStrength::None,
            ProofArg::Weak => ProofStrength::Weak,
            ProofArg::Strong => ProofStrength::Strong,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OfferClarityArg {
    Fuzzy,
    Clear,
}

impl From<OfferClarityArg> for OfferClarity {
    fn from(val: OfferClarityArg) -> Self {
        match val {
            OfferClarityArg::Fuzzy => OfferClarity::Fuzzy,
            OfferClarityArg::Clear => OfferClarity::Clear,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs CLI commands against a playbook and renders the results.
pub struct Cli {
    playbook: Playbook,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(playbook: Playbook, renderer: TerminalRenderer) -> Self {
        Self { playbook, renderer }
    }

    pub fn list_problems(&self) -> Result<()> {
        let problems = self.playbook.list_problems();
        self.renderer.render(&format!("# Problems\n\n{problems}"))
    }

    pub fn recommend(&self, params: &Recommend) -> Result<()> {
        let ranked = self.playbook.recommend(params);
        let title = match &params.problem_id {
            Some(problem_id) => format!("Frameworks for {problem_id}"),
            None => "Frameworks".to_string(),
        };
        self.renderer.render(&format!("# {title}\n\n{ranked}"))
    }

    pub fn preflight(&self, params: &LaunchMove) -> Result<()> {
        let report = self.playbook.preflight(params)?;
        self.renderer.render(&report.to_string())
    }

    pub async fn launch(&self, params: &LaunchMove) -> Result<()> {
        let outcome = self.playbook.launch(params).await?;
        self.renderer.render(&outcome.to_string())
    }

    pub async fn list_moves(&self, params: &ListMoves) -> Result<()> {
        let summaries = self.playbook.list_moves_summary(params).await?;
        let title = move_list_title(params);
        self.renderer.render(&format!("# {title}\n\n{summaries}"))
    }

    pub async fn track(&self, params: &LogTracking) -> Result<()> {
        let update = self.playbook.add_tracking_update(params).await?;
        self.renderer.render(&CreateResult::new(update).to_string())
    }

    pub async fn handle_move_command(&self, command: MoveCommands) -> Result<()> {
        match command {
            MoveCommands::List(args) => self.list_moves(&args.into()).await,
            MoveCommands::Show(args) => {
                let id = args.id;
                let mv = self
                    .playbook
                    .get_move(&args.into())
                    .await?
                    .ok_or(PlaybookError::MoveNotFound { id })?;
                self.renderer.render(&mv.to_string())
            }
            MoveCommands::Today(args) => {
                let tasks = self.playbook.move_tasks_for_day(&args.into()).await?;
                self.renderer.render(&tasks.to_string())
            }
            MoveCommands::Start(args) => self.set_status(args.id, MoveStatus::Generating).await,
            MoveCommands::Ready(args) | MoveCommands::Resume(args) => {
                self.set_status(args.id, MoveStatus::Active).await
            }
            MoveCommands::Pause(args) => self.set_status(args.id, MoveStatus::Paused).await,
            MoveCommands::Complete(args) => {
                let params: CompleteMove = args.into();
                let mv = self.playbook.complete_move(&params).await?;
                let change = format!("Completed with outcome {}", params.outcome);
                self.render_update(mv, change)
            }
            MoveCommands::Campaign(args) => {
                let mv = match args.campaign_id {
                    Some(campaign_id) if !args.detach => {
                        self.playbook
                            .attach_move_to_campaign(&CampaignLink {
                                id: args.id,
                                campaign_id,
                            })
                            .await?
                    }
                    _ => {
                        self.playbook
                            .detach_move_from_campaign(&Id { id: args.id })
                            .await?
                    }
                };
                let change = match mv.campaign_id {
                    Some(campaign_id) => format!("Linked to campaign {campaign_id}"),
                    None => "Unlinked from its campaign".to_string(),
                };
                self.render_update(mv, change)
            }
            MoveCommands::Delete(args) => {
                let mv = self.playbook.delete_move(&args.into()).await?;
                self.renderer.render(&DeleteResult::new(mv).to_string())
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        let (task, change) = match command {
            TaskCommands::Toggle(args) => {
                let task = self.playbook.toggle_task_done(&args.into()).await?;
                let change = if task.done {
                    "Marked as done"
                } else {
                    "Marked as not done"
                };
                (task, change.to_string())
            }
            TaskCommands::Day(args) => {
                let task = self.playbook.set_task_day(&args.into()).await?;
                let change = format!("Moved to day {}", task.day);
                (task, change)
            }
            TaskCommands::Proof(args) => {
                let task = self.playbook.attach_proof_to_task(&args.into()).await?;
                (task, "Proof attached".to_string())
            }
        };
        self.renderer
            .render(&UpdateResult::with_changes(task, vec![change]).to_string())
    }

    pub fn render_error(&self, status: &OperationStatus) {
        self.renderer.render_error(status);
    }

    async fn set_status(&self, id: u64, status: MoveStatus) -> Result<()> {
        let mv = self
            .playbook
            .update_status(&SetStatus { id, status })
            .await?;
        self.render_update(mv, format!("Status changed to {status}"))
    }

    fn render_update(&self, mv: Move, change: String) -> Result<()> {
        self.renderer
            .render(&UpdateResult::with_changes(mv, vec![change]).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(
            parse_input("offer=Free audit"),
            Ok(("offer".to_string(), "Free audit".to_string()))
        );
        assert_eq!(
            parse_input("topic=a=b"),
            Ok(("topic".to_string(), "a=b".to_string()))
        );
        assert!(parse_input("offer").is_err());
        assert!(parse_input("=value").is_err());
    }

    #[test]
    fn test_launch_args_into_params() {
        let args = LaunchArgs {
            problem: "need-customers-fast".to_string(),
            framework: None,
            situation: SituationArgs {
                speed: Some(Speed::Week),
                proof: Some(ProofArg::Weak),
                ..Default::default()
            },
            inputs: vec![("offer".to_string(), "Free audit".to_string())],
            disabled_rules: vec![],
            disabled_actions: vec![2],
            removed_outputs: vec![],
            channels: vec!["email".to_string()],
            baseline: Some(0.0),
            target: Some(10.0),
            name: None,
            start: None,
            campaign: Some(4),
            team: true,
            generate_content: false,
        };

        let params: LaunchMove = args.into();
        assert_eq!(params.situation.speed_needed, Some(Speed::Week));
        assert_eq!(params.situation.proof_strength, Some(ProofStrength::Weak));
        assert_eq!(params.inputs.get("offer").map(String::as_str), Some("Free audit"));
        assert_eq!(params.disabled_actions, [2]);
        assert_eq!(params.run_mode, RunMode::Team);
        assert_eq!(params.campaign_id, Some(4));
    }
}
