//! Build steps backed by external tools.

pub mod docs;
pub mod eslint;
pub mod git;
pub mod passthrough;
pub mod pretty_quick;
pub mod webpack;

pub use docs::Docs;
pub use eslint::Eslint;
pub use git::GitStatus;
pub use passthrough::Passthrough;
pub use pretty_quick::PrettyQuick;
pub use webpack::{webpack_build, Compilation, Compiler, WebpackCli, WebpackStats};
