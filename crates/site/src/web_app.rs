use desktop_runtime::{DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="kem@arch" />
        <Meta name="description" content="Kem's portfolio, served as a tiling Linux desktop." />

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

/// Desktop runtime wired to the browser host adapters.
#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <DesktopProvider host_services=platform_host_web::build_host_services()>
            <DesktopShell />
        </DesktopProvider>
    }
}
