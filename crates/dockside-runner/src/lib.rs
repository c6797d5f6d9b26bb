//! Runs a [`DeployPlan`](dockside_core::DeployPlan) against the host.
//!
//! ```text
//! dockside
//!   1. date
//!   2. greeting
//!   3. ls -la
//!   4. mkdir -p <output_dir>
//!   5. go mod tidy
//!   6. go build -o <output_dir>/<binary>
//!   7. docker build -t <tag> -f <dockerfile> <context>
//!   8. docker ps -a (probe) ── docker rm -f <name> only if listed
//!   9. docker run -d --restart=<policy> --name <name> -p <host>:<port> <tag>
//! ```
//!
//! Steps run one at a time. The first failure stops the sequence; nothing
//! after it runs and nothing before it is undone.

pub mod doctor;
pub mod error;
pub mod executor;
pub mod sequencer;

pub use doctor::{CheckResult, Doctor, DoctorReport};
pub use error::ExecError;
pub use executor::{Captured, CommandExecutor, RealExecutor};
pub use sequencer::{RunReport, SequenceError, Sequencer};
