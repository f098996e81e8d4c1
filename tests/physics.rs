mod common;

use actor_sync::ecs::core::*;
use actor_sync::ecs::plugins::physics::{ContactEvent, KnockbackEvent, LinearVelocity, Position};
use bevy::prelude::*;
use common::*;

fn knock(app: &mut App, target: Entity, direction: Vec3, factor: u32) {
    app.world_mut().send_event(KnockbackEvent {
        target,
        direction,
        factor,
    });
}

fn contact(app: &mut App, entity: Entity, normal: Vec3) {
    app.world_mut().send_event(ContactEvent { entity, normal });
}

#[test]
fn knockback_decays_to_zero_and_stops_pushing() {
    let mut app = test_app();
    let actor = spawn_kind(&mut app, HeadKind::Goblin, BodyKind::Goblin);
    tick(&mut app);

    knock(&mut app, actor, Vec3::X, 10);
    let mut factors = Vec::new();
    for _ in 0..10 {
        tick(&mut app);
        factors.push(core_of(&app, actor).knock_factor());
        assert!(app.world().get::<LinearVelocity>(actor).unwrap().0.x > 0.0);
    }
    assert_eq!(factors, vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    assert_eq!(core_of(&app, actor).knock_direction(), None);

    ticks(&mut app, 3);
    assert_eq!(core_of(&app, actor).knock_factor(), 0);
    assert_eq!(app.world().get::<LinearVelocity>(actor).unwrap().0.x, 0.0);
}

#[test]
fn knockback_switches_to_hurt() {
    let mut app = test_app();
    let actor = spawn_kind(&mut app, HeadKind::Skeleton, BodyKind::Skeleton);
    tick(&mut app);
    assert_eq!(core_of(&app, actor).motion(), Motion::Idle);

    knock(&mut app, actor, Vec3::new(0.0, 0.0, -1.0), 4);
    tick(&mut app);
    assert_eq!(core_of(&app, actor).motion(), Motion::Hurt);
    assert_eq!(core_of(&app, actor).motion_time_ms(), 33);

    tick(&mut app);
    assert_eq!(core_of(&app, actor).motion(), Motion::Hurt);
}

#[test]
fn pinned_actor_ignores_knockback() {
    let mut app = test_app();
    let actor = spawn_kind(&mut app, HeadKind::Golem, BodyKind::Golem);
    edit_core(&mut app, actor, |core| core.set_flag(Flags::PINNED, true));
    tick(&mut app);

    knock(&mut app, actor, Vec3::X, 20);
    ticks(&mut app, 3);

    assert_eq!(app.world().get::<LinearVelocity>(actor).unwrap().0, Vec3::ZERO);
    assert_eq!(app.world().get::<Position>(actor).unwrap().0, Vec3::ZERO);
    assert_eq!(core_of(&app, actor).knock_factor(), 17);
}

#[test]
fn gravity_grows_while_falling_and_resets_on_landing() {
    let mut app = test_app();
    let actor = spawn_actor(
        &mut app,
        CoreState::new(HeadKind::Goblin, BodyKind::Goblin),
        Vec3::new(0.0, 30.0, 0.0),
    );

    let mut previous = 0;
    let mut landed = false;
    let mut saw_fall = false;
    for _ in 0..120 {
        tick(&mut app);
        let core = core_of(&app, actor);
        if core.is_grounded() {
            assert!(previous > 6, "landed after only {previous} ticks");
            assert_eq!(core.motion(), Motion::Land);
            assert_eq!(app.world().get::<Position>(actor).unwrap().0.y, 0.0);
            landed = true;
            break;
        }
        assert!(core.gravity_factor() > previous);
        saw_fall |= core.motion() == Motion::Fall;
        previous = core.gravity_factor();
    }

    assert!(landed);
    assert!(saw_fall);
}

#[test]
fn huge_animation_frame_holds_land_without_overflow() {
    let mut app = test_app();
    app.world_mut()
        .resource_mut::<SimulationConfig>()
        .animation_frame_ms = u32::MAX;
    let actor = spawn_actor(
        &mut app,
        CoreState::new(HeadKind::Goblin, BodyKind::Goblin),
        Vec3::new(0.0, 30.0, 0.0),
    );

    ticks(&mut app, 120);

    let core = core_of(&app, actor);
    assert!(core.is_grounded());
    assert_eq!(core.motion(), Motion::Land);
}

#[test]
fn grounded_actor_stays_grounded() {
    let mut app = test_app();
    let actor = spawn_kind(&mut app, HeadKind::Slime, BodyKind::Slime);
    for _ in 0..10 {
        tick(&mut app);
        assert!(core_of(&app, actor).is_grounded());
        assert_eq!(app.world().get::<Position>(actor).unwrap().0.y, 0.0);
    }
}

#[test]
fn floating_actor_never_accumulates_gravity() {
    let mut app = test_app();
    let mut core = CoreState::new(HeadKind::Bat, BodyKind::Bat);
    core.set_flags(Flags::FLOATING);
    let actor = spawn_actor(&mut app, core, Vec3::new(0.0, 5.0, 0.0));

    ticks(&mut app, 20);

    assert!(core_of(&app, actor).is_grounded());
    assert_eq!(app.world().get::<Position>(actor).unwrap().0.y, 5.0);
}

#[test]
fn only_upward_contacts_reset_gravity() {
    let mut app = test_app();
    let actor = spawn_actor(
        &mut app,
        CoreState::new(HeadKind::Goblin, BodyKind::Goblin),
        Vec3::new(0.0, 100.0, 0.0),
    );
    ticks(&mut app, 3);
    assert_eq!(core_of(&app, actor).gravity_factor(), 3);

    contact(&mut app, actor, Vec3::X);
    tick(&mut app);
    assert_eq!(core_of(&app, actor).gravity_factor(), 4);

    // About 60 degrees from up.
    contact(&mut app, actor, Vec3::new(1.7, 1.0, 0.0));
    tick(&mut app);
    assert_eq!(core_of(&app, actor).gravity_factor(), 5);

    // About 27 degrees from up.
    contact(&mut app, actor, Vec3::new(0.5, 1.0, 0.0));
    tick(&mut app);
    assert_eq!(core_of(&app, actor).gravity_factor(), 0);
}

#[test]
fn partial_ticks_do_not_advance_counters() {
    let mut app = test_app();
    let actor = spawn_actor(
        &mut app,
        CoreState::new(HeadKind::Goblin, BodyKind::Goblin),
        Vec3::new(0.0, 100.0, 0.0),
    );
    tick(&mut app);
    knock(&mut app, actor, Vec3::Z, 8);
    ticks(&mut app, 2);

    let before = core_of(&app, actor);
    let tick_before = app.world().resource::<TickContext>().tick;

    partial_tick(&mut app);

    let after = core_of(&app, actor);
    assert_eq!(after.gravity_factor(), before.gravity_factor());
    assert_eq!(after.knock_factor(), before.knock_factor());
    assert_eq!(after.motion(), before.motion());
    assert_eq!(after.motion_time_ms(), before.motion_time_ms());
    assert_eq!(app.world().resource::<TickContext>().tick, tick_before);

    tick(&mut app);
    assert_eq!(core_of(&app, actor).knock_factor(), before.knock_factor() - 1);
    assert_eq!(app.world().resource::<TickContext>().tick, tick_before + 1);
}
