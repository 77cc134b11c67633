//! A contact list driven through an adapter, with a console "host widget".
//!
//! Run with `RUST_LOG=rowbind=debug cargo run --example contacts` to see the
//! adapter's logging alongside the host's output.

use std::sync::Arc;

use parking_lot::Mutex;
use rowbind::{
    Adapter, AdapterConfig, ChangeNotification, ClickDispatch, ItemView, LayoutId,
    LongClickDispatch, NotificationSink, ReplaceMode, ViewFactory, ViewHolder, ViewId,
};
use tracing_subscriber::EnvFilter;

const NAME: ViewId = ViewId(1);
const PHONE: ViewId = ViewId(2);

#[derive(Debug, Clone, PartialEq)]
struct Contact {
    name: String,
    phone: String,
}

impl Contact {
    fn new(name: &str, phone: &str) -> Self {
        Self {
            name: name.to_string(),
            phone: phone.to_string(),
        }
    }
}

/// A text field inside a console row.
#[derive(Default)]
struct TextField(Mutex<String>);

impl TextField {
    fn set(&self, text: &str) {
        *self.0.lock() = text.to_string();
    }
}

/// A console row with two text fields.
#[derive(Default)]
struct ConsoleRow {
    name: Arc<TextField>,
    phone: Arc<TextField>,
    on_click: Option<ClickDispatch<ConsoleRow>>,
    on_long_click: Option<LongClickDispatch<ConsoleRow>>,
}

impl ConsoleRow {
    fn line(&self) -> String {
        format!("{:<10} {}", self.name.0.lock(), self.phone.0.lock())
    }

    fn click(&self) {
        if let Some(dispatch) = &self.on_click {
            dispatch(self);
        }
    }

    fn long_click(&self) -> bool {
        self.on_long_click
            .as_ref()
            .is_some_and(|dispatch| dispatch(self))
    }
}

impl ItemView for ConsoleRow {
    type Child = Arc<TextField>;

    fn find_child(&self, id: ViewId) -> Option<Arc<TextField>> {
        match id {
            NAME => Some(self.name.clone()),
            PHONE => Some(self.phone.clone()),
            _ => None,
        }
    }

    fn set_click_dispatch(&mut self, dispatch: Option<ClickDispatch<Self>>) {
        self.on_click = dispatch;
    }

    fn set_long_click_dispatch(&mut self, dispatch: Option<LongClickDispatch<Self>>) {
        self.on_long_click = dispatch;
    }
}

struct ConsoleInflater;

impl ViewFactory for ConsoleInflater {
    type View = ConsoleRow;

    fn create(&self, layout: LayoutId) -> ConsoleRow {
        println!("  (inflating {layout})");
        ConsoleRow::default()
    }
}

/// Prints every notification it receives.
struct ConsoleHost;

impl NotificationSink for ConsoleHost {
    fn notify(&self, change: &ChangeNotification) {
        println!("host <- {change}");
    }
}

fn render(holder: &mut ViewHolder<ConsoleRow>, _pos: usize, contact: &Contact) {
    if let Ok(field) = holder.find_child(NAME) {
        field.set(&contact.name);
    }
    if let Ok(field) = holder.find_child(PHONE) {
        field.set(&contact.phone);
    }
}

fn draw(adapter: &Adapter<Contact, ConsoleRow>, holder: &mut ViewHolder<ConsoleRow>) {
    let count = adapter.item_count().unwrap_or(0);
    println!("--- {count} contacts ---");
    for pos in 0..count {
        if adapter.bind_row(pos, holder).is_ok() {
            println!("{pos:>2}: {}", holder.view().line());
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AdapterConfig::from_toml_str(
        r#"
        layout = 3
        sub_view_ids = [1, 2]
        insert_notification = "inserted"
        replace_mode = "cover-append"
        "#,
    )?;

    let adapter = Adapter::new(config, render);
    adapter.connect_sink(Arc::new(ConsoleHost));
    adapter.set_on_item_click(|row: &ConsoleRow, pos| println!("clicked #{pos}: {}", row.line()));
    adapter.set_on_item_long_click(|_, pos| {
        println!("long-pressed #{pos}");
        true
    });

    adapter.add_items(vec![
        Contact::new("Ada", "555-0101"),
        Contact::new("Grace", "555-0102"),
        Contact::new("Linus", "555-0103"),
    ])?;
    adapter.insert_item(Contact::new("Barbara", "555-0104"), 1)?;

    // A single recycled holder is enough for a console.
    let mut holder = adapter.create_holder(&ConsoleInflater)?;
    draw(&adapter, &mut holder);

    adapter.stick_to_top(0)?;
    adapter.set_items_at(
        2,
        vec![
            Contact::new("Linus", "555-0199"),
            Contact::new("Ada", "555-0101"),
            Contact::new("Ken", "555-0105"),
        ],
    )?;
    adapter.remove_value(&Contact::new("Grace", "555-0102"))?;
    draw(&adapter, &mut holder);

    adapter.bind_row(0, &mut holder)?;
    holder.view().click();
    holder.view().long_click();

    adapter.set_replace_policy(ReplaceMode::ShowError.policy());
    if let Err(err) = adapter.set_items(vec![Contact::new("Nobody", "-"); 9]) {
        println!("rejected: {err}");
    }

    adapter.reverse_items()?;
    draw(&adapter, &mut holder);

    Ok(())
}
