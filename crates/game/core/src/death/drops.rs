use arrayvec::ArrayVec;

use crate::engine::CombatContext;
use crate::env::DropEntry;
use crate::event::CombatEvent;
use crate::state::{GroundItem, Position};

/// Rolls each entry on its own and grants what comes up.
///
/// A roll succeeds when a unit float is below the entry's chance; quantity is
/// then uniform in `[min, max]`.
pub fn roll_drops<'d>(ctx: &mut CombatContext<'_>, drops: impl IntoIterator<Item = &'d DropEntry>) {
    for entry in drops {
        if !ctx.rng.chance(entry.chance) {
            continue;
        }
        let (min, max) = entry.quantity_bounds();
        let quantity = ctx.rng.range_inclusive(min, max);
        grant_item(ctx, &entry.item, quantity);
    }
}

/// Puts items in the inventory, except the heart item which raises max hp.
pub fn grant_item(ctx: &mut CombatContext<'_>, item: &str, quantity: u32) {
    if quantity == 0 {
        return;
    }

    if item == ctx.config.heart_item {
        for _ in 0..quantity {
            ctx.player.raise_max_hp(ctx.config.heart_bonus_hp);
        }
        ctx.report.push(CombatEvent::MaxHpRaised {
            max_hp: ctx.player.max_hp,
        });
        ctx.report
            .set_status("Found a Heart. Max health increased!");
        ctx.report
            .set_toast(format!("Max HP +{}", ctx.config.heart_bonus_hp * quantity));
        return;
    }

    ctx.inventory.add(item, quantity);
    ctx.report.push(CombatEvent::ItemGranted {
        item: item.to_string(),
        quantity,
    });
}

/// Search order around a death tile: centre, orthogonal, then diagonal.
const DROP_OFFSETS: [(i32, i32); 9] = [
    (0, 0),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Places each item as a ground pickup near `center`.
///
/// A tile is open when actors could walk on it and no ground item lies there.
/// Items placed by this call never share a tile while any walkable candidate
/// remains; with no candidate at all they fall back to the centre.
pub fn place_ground_drops(ctx: &mut CombatContext<'_>, center: Position, items: &[String]) {
    let map = ctx.env.map();
    let candidates: ArrayVec<Position, 9> = DROP_OFFSETS
        .iter()
        .map(|(dx, dy)| center.offset(*dx, *dy))
        .filter(|tile| map.is_walkable(*tile))
        .collect();
    let mut placed: ArrayVec<Position, 9> = ArrayVec::new();

    for item in items {
        let session = &*ctx.session;
        let position = candidates
            .iter()
            .find(|tile| !session.has_ground_item_at(**tile))
            .or_else(|| candidates.iter().find(|tile| !placed.contains(*tile)))
            .copied()
            .unwrap_or(center);

        if !placed.is_full() && !placed.contains(&position) {
            placed.push(position);
        }
        ctx.session
            .ground_items
            .push(GroundItem::new(item.clone(), 1, position));
        ctx.report.push(CombatEvent::GroundDrop {
            item: item.clone(),
            position,
        });
    }
}
