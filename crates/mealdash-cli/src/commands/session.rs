use anyhow::{Result, bail};
use mealdash_application::DashboardStore;
use mealdash_core::session::SessionState;

pub async fn login(store: &DashboardStore, username: &str, password: &str) -> Result<()> {
    if let Err(e) = store.login(username, password).await {
        bail!("{}", e.message());
    }

    if let Some(user) = store.user().await {
        println!("Signed in as {} <{}>", user.name, user.email);
    }
    Ok(())
}

pub async fn logout(store: &DashboardStore) {
    store.logout().await;
    println!("Signed out");
}

pub async fn whoami(store: &DashboardStore) {
    let session = store.session().await;
    match (session.state(), session.user()) {
        (SessionState::Authenticated, Some(user)) => {
            println!("id:     {}", user.id);
            println!("name:   {}", user.name);
            println!("email:  {}", user.email);
            println!("avatar: {}", user.avatar_url);
        }
        _ => println!("Not signed in"),
    }
}
