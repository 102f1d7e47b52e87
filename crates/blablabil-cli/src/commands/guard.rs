use anyhow::Result;
use blablabil_application::{GuardDecision, RouteGuard, bootstrap};

pub async fn evaluate(path: &str, admin: bool) -> Result<()> {
    let app = bootstrap().await?;

    let guard = if admin {
        RouteGuard::admin()
    } else {
        RouteGuard::authenticated()
    };

    match guard.evaluate(&app.session.snapshot().await, path) {
        GuardDecision::Waiting => println!("Session still restoring, hold rendering"),
        GuardDecision::Render => println!("✅ {path} renders for the current session"),
        GuardDecision::RedirectToLogin {
            return_to: Some(return_to),
        } => println!("Redirect to login, then back to {return_to}"),
        GuardDecision::RedirectToLogin { return_to: None } => println!("Redirect to login"),
        GuardDecision::Denied => println!("❌ Access denied: admin only"),
    }
    Ok(())
}
