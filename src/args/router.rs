//! Router — classifies tokens one at a time and routes them to a stream.
//!
//! Priority per token:
//!
//! 1. value of a pending valued option
//! 2. runtime-valued option
//! 3. framework-valued option
//! 4. framework flag
//! 5. any other `-option`
//! 6. bare value
//!
//! Once `-jar` has named the archive, table lookup stops and every remaining
//! token goes to the application. Whitespace-only tokens are dropped.
//!
//! Valued options claim the next token unconditionally, even when it looks
//! like an option.

use crate::args::error::LaunchError;
use crate::args::identity::{
    resolve_bare, resolve_client_option, resolve_jar_option, Identity, IdentityState,
};
use crate::args::probe::PathProbe;
use crate::args::registry::{OptionDef, OptionKind, OptionRole, OptionTable};
use crate::config::LauncherConfig;

/// Destination stream of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Runtime,
    Framework,
    Application,
}

/// Whether the router expects the next token to be an option value.
#[derive(Debug, Clone, Copy, Default)]
pub enum Pending {
    #[default]
    Idle,
    AwaitingValue {
        owner: Stream,
        option: &'static OptionDef,
    },
}

/// What happened to a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// A valued option; the next token is its value.
    AwaitingValue(Stream),
    /// Appended (alone or with its option) to a stream.
    Appended(Stream),
    /// Remembered as a search-path value.
    SearchPath,
    /// Consumed by identity resolution.
    Identity,
    /// Whitespace-only token, dropped.
    Skipped,
}

/// Mutable state carried across one invocation's token stream.
#[derive(Debug, Clone)]
pub struct RouterState {
    pub pending: Pending,
    pub identity: IdentityState,
    /// Cleared by `-usage` / `-help`.
    pub identity_required: bool,
    pub runtime_args: Vec<String>,
    pub framework_args: Vec<String>,
    pub app_args: Vec<String>,
    /// User search-path values, in the order given.
    pub search_path: Vec<String>,
}

impl RouterState {
    pub fn new() -> Self {
        Self {
            pending: Pending::Idle,
            identity: IdentityState::Unset,
            identity_required: true,
            runtime_args: Vec::new(),
            framework_args: Vec::new(),
            app_args: Vec::new(),
            search_path: Vec::new(),
        }
    }

    /// Seed the runtime stream with pre-set VM options.
    pub fn with_vm_args(mut self, vm: VmArgs) -> Self {
        self.runtime_args.extend(vm.options);
        self.search_path.extend(vm.search_path);
        self
    }
}

impl Default for RouterState {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the router collected once the token stream is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedArgs {
    pub runtime_args: Vec<String>,
    pub framework_args: Vec<String>,
    pub app_args: Vec<String>,
    pub search_path: Vec<String>,
    pub identity: Option<Identity>,
    pub identity_required: bool,
}

/// The token state machine.
pub struct Router<'a, P> {
    table: &'a OptionTable,
    config: &'a LauncherConfig,
    probe: P,
    state: RouterState,
}

impl<'a, P: PathProbe> Router<'a, P> {
    pub fn new(table: &'a OptionTable, config: &'a LauncherConfig, probe: P) -> Self {
        Self::with_state(table, config, probe, RouterState::new())
    }

    pub fn with_state(
        table: &'a OptionTable,
        config: &'a LauncherConfig,
        probe: P,
        state: RouterState,
    ) -> Self {
        Self {
            table,
            config,
            probe,
            state,
        }
    }

    pub fn state(&self) -> &RouterState {
        &self.state
    }

    /// Route every token, then finish.
    pub fn route_all<S: AsRef<str>>(
        mut self,
        tokens: impl IntoIterator<Item = S>,
    ) -> Result<RoutedArgs, LaunchError> {
        for token in tokens {
            self.step(token.as_ref())?;
        }
        self.finish()
    }

    /// Classify and route one token.
    pub fn step(&mut self, token: &str) -> Result<Routed, LaunchError> {
        if let Pending::AwaitingValue { owner, option } = std::mem::take(&mut self.state.pending) {
            return self.accept_value(owner, option, token);
        }

        if !token.is_empty() && token.trim().is_empty() {
            tracing::debug!("Dropped whitespace-only token");
            return Ok(Routed::Skipped);
        }

        // Everything after `-jar <archive>` is the archive's own command line.
        if self.state.identity.is_jar_setting() {
            return Ok(self.push(Stream::Application, [token]));
        }

        if let Some(def) = self.table.lookup(token) {
            return Ok(self.accept_option(def));
        }

        let routed = if token.starts_with('-') {
            // Unknown option: runtime until the identity is final.
            if self.state.identity.is_final() {
                self.push(Stream::Application, [token])
            } else {
                self.push(Stream::Runtime, [token])
            }
        } else if self.state.identity.is_set() || token.is_empty() {
            self.push(Stream::Application, [token])
        } else {
            let identity = resolve_bare(token, self.config);
            tracing::info!("Identity from bare token: {}", identity.handoff_clause());
            self.state.identity = IdentityState::Final(identity);
            Routed::Identity
        };

        tracing::debug!(token, ?routed, "Routed token");
        Ok(routed)
    }

    /// End of input. A pending valued option is an error.
    pub fn finish(self) -> Result<RoutedArgs, LaunchError> {
        if let Pending::AwaitingValue { option, .. } = self.state.pending {
            return Err(LaunchError::MissingValue {
                option: option.spelling.to_string(),
            });
        }

        let state = self.state;
        Ok(RoutedArgs {
            runtime_args: state.runtime_args,
            framework_args: state.framework_args,
            app_args: state.app_args,
            search_path: state.search_path,
            identity: state.identity.into_identity(),
            identity_required: state.identity_required,
        })
    }

    fn accept_option(&mut self, def: &'static OptionDef) -> Routed {
        tracing::debug!(option = def.spelling, description = def.description, "Matched option");
        match def.kind {
            OptionKind::RuntimeValued => {
                self.state.pending = Pending::AwaitingValue {
                    owner: Stream::Runtime,
                    option: def,
                };
                Routed::AwaitingValue(Stream::Runtime)
            }
            OptionKind::FrameworkValued => {
                self.state.pending = Pending::AwaitingValue {
                    owner: Stream::Framework,
                    option: def,
                };
                Routed::AwaitingValue(Stream::Framework)
            }
            OptionKind::FrameworkFlag => {
                if def.clears_identity_requirement() {
                    self.state.identity_required = false;
                }
                self.push(Stream::Framework, [def.spelling])
            }
        }
    }

    fn accept_value(
        &mut self,
        owner: Stream,
        option: &'static OptionDef,
        value: &str,
    ) -> Result<Routed, LaunchError> {
        let routed = match (owner, option.role) {
            (Stream::Runtime, OptionRole::ClassPath) => {
                self.state.search_path.push(value.to_string());
                Routed::SearchPath
            }
            (_, OptionRole::Jar | OptionRole::Client) if self.state.identity.is_final() => {
                tracing::warn!(
                    "{} {} ignored: identity already resolved, forwarding to application",
                    option.spelling,
                    value
                );
                self.push(Stream::Application, [option.spelling, value])
            }
            (Stream::Runtime, OptionRole::Jar) => {
                let identity = resolve_jar_option(value);
                tracing::info!("Identity from {}: {}", option.spelling, identity.handoff_clause());
                self.state.identity = IdentityState::Final(identity);
                Routed::Identity
            }
            (Stream::Framework, OptionRole::Client) => {
                let identity = resolve_client_option(value, &self.probe, self.config)?;
                if let IdentityState::Tentative(previous) = &self.state.identity {
                    tracing::info!("{} overrides {}", identity.handoff_clause(), previous.handoff_clause());
                } else {
                    tracing::info!("Identity from {}: {}", option.spelling, identity.handoff_clause());
                }
                self.state.identity = IdentityState::Tentative(identity);
                Routed::Identity
            }
            (stream, _) => self.push(stream, [option.spelling, value]),
        };
        Ok(routed)
    }

    fn push<const N: usize>(&mut self, stream: Stream, items: [&str; N]) -> Routed {
        let target = match stream {
            Stream::Runtime => &mut self.state.runtime_args,
            Stream::Framework => &mut self.state.framework_args,
            Stream::Application => &mut self.state.app_args,
        };
        target.extend(items.iter().map(|s| s.to_string()));
        Routed::Appended(stream)
    }
}

/// Pre-set VM options, split into search-path values and other options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VmArgs {
    pub options: Vec<String>,
    pub search_path: Vec<String>,
}

/// Route pre-set VM option tokens. Only options are allowed here.
pub fn route_vm_args(tokens: &[String], table: &OptionTable) -> Result<VmArgs, LaunchError> {
    let mut vm = VmArgs::default();
    let mut iter = tokens.iter();

    while let Some(token) = iter.next() {
        match table.lookup(token) {
            Some(def) if def.kind == OptionKind::RuntimeValued => {
                let value = iter.next().ok_or_else(|| LaunchError::MissingValue {
                    option: def.spelling.to_string(),
                })?;
                if def.role == OptionRole::ClassPath {
                    vm.search_path.push(value.clone());
                } else {
                    vm.options.push(token.clone());
                    vm.options.push(value.clone());
                }
            }
            _ if token.starts_with('-') => vm.options.push(token.clone()),
            _ => {
                return Err(LaunchError::UnrecognizedVmArg {
                    arg: token.clone(),
                })
            }
        }
    }

    Ok(vm)
}
