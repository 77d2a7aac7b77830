//! Users / posts command handlers.

use serde::Serialize;
use tabled::Tabled;
use taskdeck_core::{
    CollectionKind, DataLayer, FetchState, PageSummary, RemoteItems, RemotePost, RemoteUser,
};
use tracing::debug;

use crate::cli::{OutputFormat, RemoteListArgs};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

const EXCERPT_CHARS: usize = 60;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Company")]
    company: String,
}

impl From<&RemoteUser> for UserRow {
    fn from(u: &RemoteUser) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            username: u.username.clone(),
            email: u.email.clone(),
            city: u.address.city.clone(),
            company: u.company.name.clone(),
        }
    }
}

#[derive(Tabled)]
struct PostRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "User")]
    user_id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Excerpt")]
    excerpt: String,
}

impl From<&RemotePost> for PostRow {
    fn from(p: &RemotePost) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            title: p.title.clone(),
            excerpt: p.excerpt(EXCERPT_CHARS),
        }
    }
}

/// Structured output: the page plus where it sits in the result set.
#[derive(Serialize)]
struct PageEnvelope<'a, T> {
    #[serde(flatten)]
    summary: PageSummary,
    items: &'a [T],
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    layer: &mut DataLayer,
    kind: CollectionKind,
    args: RemoteListArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    layer.set_active_kind(kind);
    layer.settle().await;

    let state = layer.fetch_state(kind);
    if let FetchState::Error { error } = state.as_ref() {
        return Err(CliError::fetch_failed(kind, error));
    }

    if let Some(term) = args.search {
        layer.set_search_term(term);
    }
    layer.set_page(args.page);

    let summary = layer.page_summary();
    debug!(%kind, ?summary, "rendering page");

    let out = match layer.visible_items() {
        RemoteItems::Users(users) => render_page(settings.output, users.as_slice(), summary, |u| {
            UserRow::from(u)
        })?,
        RemoteItems::Posts(posts) => render_page(settings.output, posts.as_slice(), summary, |p| {
            PostRow::from(p)
        })?,
    };
    output::print_output(&out, settings.quiet);

    if settings.output == OutputFormat::Table {
        output::print_note(
            &output::hint_line(
                &summary_line(kind, summary, layer.view().term()),
                settings.color,
            ),
            settings.quiet,
        );
    }
    Ok(())
}

fn render_page<T, R>(
    format: OutputFormat,
    items: &[T],
    summary: PageSummary,
    to_row: impl Fn(&T) -> R,
) -> Result<String, CliError>
where
    T: Serialize + HasId,
    R: Tabled,
{
    match format {
        OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml => {
            let envelope = PageEnvelope { summary, items };
            output::render_single(format, &envelope, |_| String::new(), |_| String::new())
        }
        OutputFormat::Table | OutputFormat::Plain => {
            output::render_list(format, items, to_row, |item| item.id().to_string())
        }
    }
}

fn summary_line(kind: CollectionKind, summary: PageSummary, term: &str) -> String {
    let searching = !term.trim().is_empty();
    if summary.matched == 0 {
        return if searching {
            format!("No {kind} found matching \"{term}\"")
        } else {
            format!("No {kind} available")
        };
    }

    let mut line = format!("Showing {} of {} {kind}", summary.shown, summary.matched);
    if searching {
        line.push_str(&format!(" matching \"{term}\""));
    }
    if summary.total_pages > 1 {
        line.push_str(&format!(" (page {} of {})", summary.page, summary.total_pages));
    }
    line
}

/// Records with a numeric id, for plain output.
trait HasId {
    fn id(&self) -> u64;
}

impl HasId for RemoteUser {
    fn id(&self) -> u64 {
        self.id
    }
}

impl HasId for RemotePost {
    fn id(&self) -> u64 {
        self.id
    }
}
