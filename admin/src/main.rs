//! Admin console walkthrough.
//!
//! Drives every operator flow end to end against the in-process doubles
//! from `marquee-testing`: the pushed feed, filtering, sorting, a confirmed
//! delete, form navigation, and sign-out.
//!
//! ```bash
//! cargo run -p marquee-admin
//! ```

use marquee_admin::events::{EventsAction, SortColumn, TableBody, TableView};
use marquee_admin::{AdminApp, AdminConfig, Collaborators};
use marquee_core::auth::{Credentials, Role, UserId};
use marquee_core::collection::{RecordId, Snapshot};
use marquee_core::dialog::Confirmation;
use marquee_core::routing::RoutePath;
use marquee_testing::helpers::document;
use marquee_testing::{
    InMemoryCollectionStore, RecordingNotifier, RecordingRouter, ScriptedConfirmer,
    StubAuthGateway,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn seeded_events() -> Snapshot {
    Snapshot::new(vec![
        document(
            "e1",
            [
                ("title", json!("Jazz Brunch")),
                ("location", json!("River Terrace")),
                ("date", json!("2025-03-02")),
                ("details", json!("Two sets of standards over brunch service")),
            ],
        ),
        document(
            "e2",
            [
                ("title", json!("Opera Night")),
                ("location", json!("Grand Hall")),
                ("date", json!("2025-03-14")),
                (
                    "details",
                    json!("An evening of arias and overtures from the touring company"),
                ),
            ],
        ),
        document(
            "e3",
            [
                ("title", json!("Chamber Recital")),
                ("location", json!("Blue Room")),
                ("date", json!("2025-03-21")),
                ("details", json!("Strings and piano, one hour, no interval")),
            ],
        ),
        document(
            "e4",
            [
                ("title", json!("Ballet Gala")),
                ("location", json!("Grand Hall")),
                ("date", json!("2025-04-01")),
                ("details", json!("Season opener with the full corps")),
            ],
        ),
    ])
}

fn print_table(table: &TableView) {
    match &table.body {
        TableBody::Placeholder(text) => println!("  {text}"),
        TableBody::Rows(rows) => {
            for row in rows {
                println!(
                    "  {:>2}. {:<16} {:<14} {:<12} {}",
                    row.ordinal,
                    row.title,
                    row.location.as_deref().unwrap_or("-"),
                    row.date.as_deref().unwrap_or("-"),
                    row.details_preview,
                );
            }
            println!(
                "  page {} of {} ({} matching)",
                table.page + 1,
                table.page_count,
                table.filtered_len
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_admin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Marquee Admin Console ===\n");

    // 2. Collaborator doubles stand in for the remote services
    let records = Arc::new(InMemoryCollectionStore::new());
    let confirmer = Arc::new(ScriptedConfirmer::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let router = Arc::new(RecordingRouter::new());
    let collaborators = Collaborators::new(
        Arc::clone(&records) as Arc<dyn marquee_core::collection::CollectionStore>,
        Arc::new(StubAuthGateway::signed_in(
            Credentials::new(UserId::new("usr-admin"), "ops@marquee.dev"),
            Role::Admin,
        )),
        Arc::clone(&confirmer) as Arc<dyn marquee_core::dialog::Confirmer>,
        Arc::clone(&notifier) as Arc<dyn marquee_core::notify::Notifier>,
        Arc::clone(&router) as Arc<dyn marquee_core::routing::Router>,
        Arc::new(marquee_core::environment::SystemClock),
    );

    // 3. Wire and start the app
    let config = AdminConfig::default();
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout);
    let app = AdminApp::new(config, &collaborators);
    app.start().await?;

    // 4. Nothing pushed yet: the table reports loading
    println!("Before the first push:");
    print_table(&app.events().table().await);

    // 5. The store pushes the whole collection
    records.push_snapshot(seeded_events());
    tokio::time::sleep(Duration::from_millis(50)).await;
    println!("\nAfter the feed lands:");
    print_table(&app.events().table().await);

    // 6. Filter matches title, venue, and date
    app.events()
        .send(EventsAction::FilterChanged {
            filter: "Grand Hall".to_string(),
        })
        .await?;
    println!("\nFiltered to \"Grand Hall\":");
    print_table(&app.events().table().await);

    // 7. Sort by title, ascending
    app.events()
        .send(EventsAction::FilterChanged {
            filter: String::new(),
        })
        .await?;
    app.events()
        .send(EventsAction::SortToggled {
            column: SortColumn::Title,
        })
        .await?;
    println!("\nSorted by title:");
    print_table(&app.events().table().await);

    // 8. Delete runs through the dialog and the remote store
    confirmer.push_response(Confirmation::confirmed());
    let verdict = app
        .events()
        .send_and_wait_for(
            EventsAction::DeleteRequested {
                id: RecordId::new("e1"),
            },
            |action| {
                matches!(
                    action,
                    EventsAction::DeleteSucceeded { .. } | EventsAction::DeleteFailed { .. }
                )
            },
            Duration::from_secs(1),
        )
        .await?;
    println!("\nDelete verdict: {verdict:?}");
    for request in confirmer.requests() {
        println!("  dialog shown: {} / {}", request.title, request.message);
    }
    for notice in notifier.notices() {
        println!("  notice: [{:?}] {}: {}", notice.severity, notice.title, notice.message);
    }

    // The listing only changes when the feed echoes the removal
    records.push_snapshot(Snapshot::new(
        seeded_events()
            .documents
            .into_iter()
            .filter(|doc| doc.id != RecordId::new("e1"))
            .collect(),
    ));
    tokio::time::sleep(Duration::from_millis(50)).await;
    println!("\nAfter the feed confirms the removal:");
    print_table(&app.events().table().await);

    // 9. Form navigation goes through the router
    app.events().send(EventsAction::CreateRequested).await?;
    app.events()
        .send(EventsAction::UpdateRequested {
            id: RecordId::new("e2"),
        })
        .await?;
    tokio::time::sleep(Duration::from_millis(50)).await;

    // 10. The header reads the live session
    let header = app.nav().header().await;
    println!(
        "\nHeader (signed in): button \"{}\", dashboard link: {}",
        header.auth_label, header.admin_link
    );
    for entry in &header.entries {
        let marker = if entry.active { ">" } else { " " };
        println!("  {marker} {} ({})", entry.label, entry.path.as_str());
    }

    // 11. Sign out through the header button
    app.nav().press_auth_button().await?;
    tokio::time::sleep(Duration::from_millis(50)).await;
    let header = app.nav().header().await;
    println!(
        "\nHeader (signed out): button \"{}\", dashboard link: {}",
        header.auth_label, header.admin_link
    );
    let visited = router.visited();
    let paths: Vec<&str> = visited.iter().map(RoutePath::as_str).collect();
    println!("  router visited: {paths:?}");

    // 12. Shutdown drains in-flight work and releases the subscription
    app.shutdown(shutdown_timeout).await?;
    println!(
        "\nActive subscriptions after shutdown: {}",
        records.active_subscriptions()
    );

    println!("\n=== Demo Complete ===");
    Ok(())
}
