//! Unauthenticated liveness banner.

pub async fn root() -> &'static str { "JobMela backend running" }
