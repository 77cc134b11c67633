//! Property-based tests: the adapter against a plain `Vec` shadow model.
//!
//! Verifies, after every operation of a random sequence:
//! 1. The adapter holds exactly what the shadow `Vec` holds
//! 2. A failing operation leaves the collection unchanged and emits nothing
//! 3. A host that only tracks structural notifications agrees on the count
//! 4. Binding any position renders the item at that position

use std::sync::Arc;

use parking_lot::Mutex;
use proptest::prelude::*;
use rowbind::{
    Adapter, AdapterConfig, ChangeNotification, ClickDispatch, InsertNotification, ItemView,
    LayoutId, LongClickDispatch, ReplaceMode, ViewFactory, ViewHolder, ViewId,
};

#[derive(Default)]
struct Cell {
    shown: Option<u8>,
}

impl ItemView for Cell {
    type Child = ViewId;

    fn find_child(&self, id: ViewId) -> Option<ViewId> {
        Some(id)
    }

    fn set_click_dispatch(&mut self, _: Option<ClickDispatch<Self>>) {}

    fn set_long_click_dispatch(&mut self, _: Option<LongClickDispatch<Self>>) {}
}

struct Cells;

impl ViewFactory for Cells {
    type View = Cell;

    fn create(&self, _layout: LayoutId) -> Cell {
        Cell::default()
    }
}

#[derive(Debug, Clone)]
enum Op {
    Add(u8),
    Insert(usize, u8),
    AddMany(Vec<u8>),
    InsertMany(usize, Vec<u8>),
    Set(usize, u8),
    SetItemsAt(usize, Vec<u8>, ReplaceMode),
    Remove(usize),
    RemoveRange(usize, usize),
    StickToTop(usize),
    Reverse,
    Clear,
    Replace(Vec<u8>),
}

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_items() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..6)
}

fn arb_mode() -> impl Strategy<Value = ReplaceMode> {
    prop_oneof![
        Just(ReplaceMode::CoverOnly),
        Just(ReplaceMode::CoverAppend),
        Just(ReplaceMode::ShowError),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    let pos = 0usize..12;
    prop_oneof![
        any::<u8>().prop_map(Op::Add),
        (pos.clone(), any::<u8>()).prop_map(|(p, v)| Op::Insert(p, v)),
        arb_items().prop_map(Op::AddMany),
        (pos.clone(), arb_items()).prop_map(|(p, v)| Op::InsertMany(p, v)),
        (pos.clone(), any::<u8>()).prop_map(|(p, v)| Op::Set(p, v)),
        (pos.clone(), arb_items(), arb_mode()).prop_map(|(p, v, m)| Op::SetItemsAt(p, v, m)),
        pos.clone().prop_map(Op::Remove),
        (pos.clone(), 0usize..6).prop_map(|(p, n)| Op::RemoveRange(p, n)),
        pos.prop_map(Op::StickToTop),
        Just(Op::Reverse),
        Just(Op::Clear),
        arb_items().prop_map(Op::Replace),
    ]
}

// ── Shadow model ──────────────────────────────────────────────────────

/// Applies `op` to the shadow. Returns `false` (leaving it untouched) when
/// the adapter is expected to reject the operation.
fn apply_shadow(shadow: &mut Vec<u8>, op: &Op) -> bool {
    let len = shadow.len();
    match op {
        Op::Add(v) => shadow.push(*v),
        Op::Insert(p, v) => {
            if *p > len {
                return false;
            }
            shadow.insert(*p, *v);
        }
        Op::AddMany(items) => shadow.extend(items),
        Op::InsertMany(p, items) => {
            if *p > len {
                return false;
            }
            shadow.splice(*p..*p, items.iter().copied());
        }
        Op::Set(p, v) => match shadow.get_mut(*p) {
            Some(slot) => *slot = *v,
            None => return false,
        },
        Op::SetItemsAt(start, items, mode) => {
            if *start > len {
                return false;
            }
            let end = start + items.len();
            if end > len && *mode == ReplaceMode::ShowError {
                return false;
            }
            for (i, v) in items.iter().enumerate() {
                match shadow.get_mut(start + i) {
                    Some(slot) => *slot = *v,
                    None if *mode == ReplaceMode::CoverAppend => shadow.push(*v),
                    None => break,
                }
            }
        }
        Op::Remove(p) => {
            if *p >= len {
                return false;
            }
            shadow.remove(*p);
        }
        Op::RemoveRange(start, count) => {
            if start + count > len {
                return false;
            }
            shadow.drain(*start..start + count);
        }
        Op::StickToTop(p) => {
            if *p >= len {
                return false;
            }
            let item = shadow.remove(*p);
            shadow.push(item);
        }
        Op::Reverse => shadow.reverse(),
        Op::Clear => shadow.clear(),
        Op::Replace(items) => *shadow = items.clone(),
    }
    true
}

fn apply_adapter(adapter: &Adapter<u8, Cell>, op: &Op) -> bool {
    match op {
        Op::Add(v) => adapter.add_item(*v).is_ok(),
        Op::Insert(p, v) => adapter.insert_item(*v, *p).is_ok(),
        Op::AddMany(items) => adapter.add_items(items.clone()).is_ok(),
        Op::InsertMany(p, items) => adapter.insert_items(*p, items.clone()).is_ok(),
        Op::Set(p, v) => adapter.set_item(*p, *v).is_ok(),
        Op::SetItemsAt(start, items, mode) => adapter
            .set_items_with(*start, items.clone(), mode.policy::<u8>().as_ref())
            .is_ok(),
        Op::Remove(p) => adapter.remove_item(*p).is_ok(),
        Op::RemoveRange(start, count) => adapter.remove_items(*start, *count).is_ok(),
        Op::StickToTop(p) => adapter.stick_to_top(*p).is_ok(),
        Op::Reverse => adapter.reverse_items().is_ok(),
        Op::Clear => adapter.clear().is_ok(),
        Op::Replace(items) => {
            adapter.replace_items(items.clone());
            true
        }
    }
}

/// Count as a host would track it: adjusted by structural notifications,
/// re-queried on invalidation.
fn replay_count(mut count: usize, changes: &[ChangeNotification], actual: usize) -> usize {
    for change in changes {
        match *change {
            ChangeNotification::ItemInserted(_) => count += 1,
            ChangeNotification::ItemsInserted { count: n, .. } => count += n,
            ChangeNotification::ItemsRemoved { count: n, .. } => count -= n,
            ChangeNotification::Invalidated => count = actual,
            ChangeNotification::ItemChanged(_) | ChangeNotification::ItemsRangeChanged { .. } => {}
        }
    }
    count
}

fn render(holder: &mut ViewHolder<Cell>, _pos: usize, item: &u8) {
    holder.view_mut().shown = Some(*item);
}

proptest! {
    #[test]
    fn adapter_matches_shadow(
        initial in arb_items(),
        ops in prop::collection::vec(arb_op(), 1..40),
    ) {
        let config = AdapterConfig::new(LayoutId(0))
            .with_insert_notification(InsertNotification::Inserted);
        let adapter = Adapter::with_items(config, initial.clone(), render);
        let log = Arc::new(Mutex::new(Vec::new()));
        let recv = log.clone();
        adapter.signals().changed.connect(move |c| recv.lock().push(*c));

        let mut shadow = initial;
        let mut host_count = shadow.len();

        for op in &ops {
            let expected_ok = apply_shadow(&mut shadow, op);
            let ok = apply_adapter(&adapter, op);
            let changes = std::mem::take(&mut *log.lock());

            prop_assert_eq!(ok, expected_ok, "op {:?}", op);
            prop_assert_eq!(adapter.items().unwrap(), shadow.clone(), "op {:?}", op);
            if !ok {
                prop_assert!(changes.is_empty(), "rejected op {:?} emitted {:?}", op, changes);
            }

            host_count = replay_count(host_count, &changes, shadow.len());
            prop_assert_eq!(adapter.item_count(), Some(host_count), "op {:?}", op);
        }
    }

    #[test]
    fn bind_renders_item_at_position(items in prop::collection::vec(any::<u8>(), 1..20)) {
        let adapter = Adapter::with_items(AdapterConfig::default(), items.clone(), render);
        let mut holder = adapter.create_holder(&Cells).unwrap();

        for (pos, item) in items.iter().enumerate().rev() {
            adapter.bind_row(pos, &mut holder).unwrap();
            prop_assert_eq!(holder.view().shown, Some(*item));
            prop_assert_eq!(holder.position(), Some(pos));
        }
        prop_assert!(adapter.bind_row(items.len(), &mut holder).is_err());
    }
}
