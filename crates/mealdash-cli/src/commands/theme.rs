use mealdash_application::DashboardStore;
use mealdash_core::theme::ThemeMode;

pub async fn toggle(store: &DashboardStore) {
    store.toggle_theme().await;
    show(store).await;
}

pub async fn set(store: &DashboardStore, mode: ThemeMode) {
    store.set_theme(mode.is_dark()).await;
    show(store).await;
}

pub async fn show(store: &DashboardStore) {
    let mode = ThemeMode::from_dark(store.is_dark_mode().await);
    println!("{}", mode.as_str());
}
