//! CLI commands for Chairside.
//!
//! - **Profile commands**: stats, graph, goals, badges (one profile)
//! - **Directory commands**: leaderboard (many profiles)
//! - **Utility commands**: generate, init

pub mod input;

// Profile commands
pub mod badges;
pub mod goals;
pub mod graph;
pub mod stats;

// Directory commands
pub mod leaderboard;

// Utility commands
pub mod generate;
pub mod init;

pub use badges::BadgesCommand;
pub use generate::GenerateCommand;
pub use goals::GoalsCommand;
pub use graph::GraphCommand;
pub use init::InitCommand;
pub use input::{local_today, DirectoryInput, LoadedProfile, ProfileInput};
pub use leaderboard::LeaderboardCommand;
pub use stats::StatsCommand;
