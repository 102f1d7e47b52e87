use anyhow::Result;
use blablabil_application::bootstrap;

pub async fn login(phone: &str, password: &str) -> Result<()> {
    let app = bootstrap().await?;

    let outcome = app.session.login(phone, password).await;
    if let Some(message) = outcome.error_message() {
        anyhow::bail!("{message}");
    }

    let snapshot = app.session.snapshot().await;
    let Some(user) = snapshot.user else {
        anyhow::bail!("Login succeeded but no user record was returned");
    };

    println!("✅ Signed in as {} ({})", user.full_name(), user.phone);
    if user.is_admin {
        println!("   Admin account");
    }
    Ok(())
}

pub async fn logout() -> Result<()> {
    let app = bootstrap().await?;
    app.session.logout().await;
    println!("✅ Signed out");
    Ok(())
}

pub async fn whoami() -> Result<()> {
    let app = bootstrap().await?;

    let snapshot = app.session.snapshot().await;
    let Some(user) = snapshot.user else {
        println!("Not signed in. Run `blablabil login` first.");
        return Ok(());
    };

    println!("{} <{}>", user.full_name(), user.email);
    println!("  Phone: {}", user.phone);
    println!("  Admin: {}", if user.is_admin { "yes" } else { "no" });
    if let Some(rating) = user.rating {
        println!("  Rating: {:.1}", rating);
    }
    Ok(())
}
