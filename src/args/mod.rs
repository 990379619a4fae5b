//! Argument handling pipeline for the application-client launcher.
//!
//! This module turns the launcher's command line into a runtime invocation:
//!
//! ```text
//! Raw string → Tokenize → Route → Resolve identity → Merge search path
//!            → Encode hand-off → Assemble → LaunchPlan
//! ```
//!
//! Each stage is a plain function or builder that can be unit-tested
//! independently. Filesystem access goes through [`PathProbe`].

mod assembler;
mod classpath;
mod context;
mod error;
mod handoff;
mod identity;
mod pipeline;
mod probe;
mod registry;
mod router;
mod tokenizer;

pub use assembler::{escape_argument, quote, CommandAssembler};
pub use classpath::{merge_search_path, probe_runtime_extension};
pub use context::{
    LaunchContext, ENV_APPCPATH, ENV_INSTALL_ROOT, ENV_INTERPRETER, ENV_SEARCH_PATH, ENV_VM_ARGS,
};
pub use error::LaunchError;
pub use handoff::{decode_arg, encode_arg, parse_handoff, Handoff};
pub use identity::{Identity, IdentityState, MainClause};
pub use pipeline::{
    build_launch_plan, build_launch_plan_from_tokens, route_invocation, LaunchPlan, USAGE_TOKEN,
};
pub use probe::{FsProbe, PathProbe};
pub use registry::{option_registry, OptionDef, OptionKind, OptionRole, OptionTable};
pub use router::{route_vm_args, Pending, Routed, RoutedArgs, Router, RouterState, Stream, VmArgs};
pub use tokenizer::{tokenize, TokenizeError};
