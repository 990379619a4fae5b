//! Pipeline — raw arguments in, rendered launch plan out.

use serde::Serialize;

use crate::args::assembler::{
    escape_argument, handoff_marker, join_rendered, quote, render_main_clause, CommandAssembler,
};
use crate::args::classpath::{merge_search_path, probe_runtime_extension};
use crate::args::context::LaunchContext;
use crate::args::error::LaunchError;
use crate::args::handoff::Handoff;
use crate::args::identity::Identity;
use crate::args::probe::PathProbe;
use crate::args::registry::OptionTable;
use crate::args::router::{route_vm_args, Router, RouterState};
use crate::args::tokenizer::tokenize;
use crate::config::LauncherConfig;

/// Token substituted when the user asked for nothing, or for nothing runnable.
pub const USAGE_TOKEN: &str = "-usage";

/// Fully rendered launch command and the facts it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    /// Interpreter binary, unquoted.
    pub interpreter: String,
    /// Rendered runtime options: system properties, user options, search path.
    pub runtime_options: Vec<String>,
    /// Rendered main clause (`-jar <archive>` or a class name); empty when
    /// no identity was resolved.
    pub main_clause: Vec<String>,
    /// Interpreter + runtime options + main clause.
    pub runtime_command_line: String,
    /// Comma-delimited hand-off for the launch framework.
    pub framework_handoff: String,
    /// Rendered hand-off marker option.
    pub handoff_marker: String,
    /// Application arguments, verbatim and in order.
    pub app_args: Vec<String>,
    pub identity: Option<Identity>,
    /// False once `-usage` or `-help` was seen.
    pub identity_required: bool,
}

impl LaunchPlan {
    /// True when the caller should re-run with a usage request.
    pub fn needs_usage(&self) -> bool {
        self.identity_required && self.identity.is_none()
    }

    /// The complete command line: interpreter, runtime options, hand-off
    /// marker, main clause, application arguments (each quoted and escaped).
    pub fn command_line(&self) -> String {
        let interpreter = quote(&self.interpreter);
        let app_args: Vec<String> = self.app_args.iter().map(|a| escape_argument(a)).collect();
        join_rendered(
            std::iter::once(interpreter.as_str())
                .chain(self.runtime_options.iter().map(String::as_str))
                .chain(std::iter::once(self.handoff_marker.as_str()))
                .chain(self.main_clause.iter().map(String::as_str))
                .chain(app_args.iter().map(String::as_str)),
        )
    }
}

/// Build a launch plan from a raw argument string.
///
/// This is the main entry point. It applies the usage policy: empty input
/// becomes `-usage`, and input that resolves no identity without asking for
/// usage or help is re-run with `-usage` appended.
pub fn build_launch_plan(
    raw: &str,
    ctx: &LaunchContext,
    config: &LauncherConfig,
    probe: &impl PathProbe,
) -> Result<LaunchPlan, LaunchError> {
    let tokens = tokenize(raw)?;
    build_launch_plan_from_tokens(&tokens, ctx, config, probe)
}

/// Same as [`build_launch_plan`] for arguments that are already split.
pub fn build_launch_plan_from_tokens(
    tokens: &[String],
    ctx: &LaunchContext,
    config: &LauncherConfig,
    probe: &impl PathProbe,
) -> Result<LaunchPlan, LaunchError> {
    let mut tokens = tokens.to_vec();
    if tokens.is_empty() {
        tokens.push(USAGE_TOKEN.to_string());
    }

    let plan = route_invocation(&tokens, ctx, config, probe)?;
    if !plan.needs_usage() {
        return Ok(plan);
    }

    tracing::debug!("No client specified, requesting usage");
    tokens.push(USAGE_TOKEN.to_string());
    route_invocation(&tokens, ctx, config, probe)
}

/// Route `tokens` and render the plan, with no usage policy applied.
pub fn route_invocation(
    tokens: &[String],
    ctx: &LaunchContext,
    config: &LauncherConfig,
    probe: &impl PathProbe,
) -> Result<LaunchPlan, LaunchError> {
    let table = OptionTable::standard();

    // Stage 1: Pre-set VM options
    let vm_args = match ctx.vm_args.as_deref() {
        Some(raw) => route_vm_args(&tokenize(raw)?, &OptionTable::runtime_only())?,
        None => Default::default(),
    };

    // Stage 2: Route tokens, default configuration file first
    let config_xml = ctx.default_config_xml(probe)?;
    let preamble = ["-configxml".to_string(), config_xml.display().to_string()];
    let state = RouterState::new().with_vm_args(vm_args);
    let routed = Router::with_state(&table, config, probe, state)
        .route_all(preamble.iter().chain(tokens))?;

    // Stage 3: Merge the search path
    let bootstrap = ctx.bootstrap_archive(config).display().to_string();
    let extension = if routed.search_path.is_empty() {
        probe_runtime_extension(
            ctx.search_path.as_deref(),
            ctx.path_separator,
            &config.launcher_binary,
            &config.runtime_layouts,
            probe,
        )?
    } else {
        None
    };
    let search_path = merge_search_path(
        &routed.search_path,
        &bootstrap,
        extension.as_deref(),
        ctx.path_separator,
    );

    // Stage 4: Encode the hand-off
    let framework_handoff = Handoff::new(&config.handoff_mode)
        .with_appcpath(ctx.appcpath.as_deref())
        .with_args(&routed.framework_args)
        .with_identity(routed.identity.as_ref().map(Identity::handoff_clause))
        .build();

    // Stage 5: Assemble
    let interpreter = ctx.interpreter(config).to_string();
    let runtime_options = CommandAssembler::new()
        .with_system_options(ctx)
        .with_runtime_args(&routed.runtime_args)
        .with_search_path(search_path)
        .build();
    let main_clause = render_main_clause(
        routed
            .identity
            .as_ref()
            .map(|identity| identity.main_clause(&bootstrap)),
    );
    let quoted_interpreter = quote(&interpreter);
    let runtime_command_line = join_rendered(
        std::iter::once(quoted_interpreter.as_str())
            .chain(runtime_options.iter().map(String::as_str))
            .chain(main_clause.iter().map(String::as_str)),
    );

    Ok(LaunchPlan {
        interpreter,
        runtime_options,
        main_clause,
        runtime_command_line,
        handoff_marker: handoff_marker(&bootstrap, &framework_handoff),
        framework_handoff,
        app_args: routed.app_args,
        identity: routed.identity,
        identity_required: routed.identity_required,
    })
}
