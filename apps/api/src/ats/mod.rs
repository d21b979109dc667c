// ATS scoring: aggregates the analysis service's score for one resume and
// derives recommendations. Runs independently of posting ranking.

pub mod engine;
pub mod handlers;
