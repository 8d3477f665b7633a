//! Infrastructure layer - logging and application wiring

pub mod bootstrap;
pub mod logging;

pub use bootstrap::{
    build_application_context, build_security_chain, ApplicationInfo, ROOT_CONTEXT_ID,
};
