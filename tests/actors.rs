mod common;

use actor_sync::ecs::core::*;
use actor_sync::ecs::plugins::actor::*;
use actor_sync::ecs::plugins::network::{DespawnedIds, NetworkEntityMap, NetworkId};
use actor_sync::ecs::plugins::physics::{Collider, DesiredVelocity, Facing, Position};
use actor_sync::ecs::plugins::presentation::RenderKey;
use actor_sync::ecs::plugins::sync::{Humanoid, PlayerBrain};
use bevy::prelude::*;
use common::*;
use std::f32::consts::FRAC_PI_2;

fn lookup(app: &App, id: NetworkId) -> Entity {
    app.world().resource::<NetworkEntityMap>().get(id).unwrap()
}

#[test]
fn spawn_event_builds_a_switched_character() {
    let mut app = test_app();
    app.world_mut()
        .send_event(ActorSpawnEvent::character(7, Vec3::new(1.0, 0.0, 2.0)));
    tick(&mut app);

    let entity = lookup(&app, NetworkId(7));
    let world = app.world();
    assert_eq!(world.get::<Character>(entity).unwrap().player_id, 7);
    assert!(world.get::<PlayerBrain>(entity).is_some());
    assert!(world.get::<Humanoid>(entity).is_some());
    assert!(world.get::<Collider>(entity).is_some());
    assert!(world.get::<Toggle<PlayersTeam>>(entity).unwrap().is_enabled());
    assert_eq!(world.get::<Position>(entity).unwrap().0.x, 1.0);
}

#[test]
fn creatures_get_allocated_ids() {
    let mut app = test_app();
    app.world_mut().send_event(ActorSpawnEvent::creature(
        HeadKind::Goblin,
        BodyKind::Goblin,
        Vec3::ZERO,
    ));
    app.world_mut().send_event(ActorSpawnEvent::creature(
        HeadKind::Slime,
        BodyKind::Slime,
        Vec3::ZERO,
    ));
    tick(&mut app);

    let goblin = lookup(&app, NetworkId(10_000));
    let slime = lookup(&app, NetworkId(10_001));
    assert!(app.world().get::<Creature>(goblin).is_some());
    assert_eq!(core_of(&app, slime).body(), Some(BodyKind::Slime));
}

#[test]
fn despawn_event_unregisters_the_actor() {
    let mut app = test_app();
    app.world_mut()
        .send_event(ActorSpawnEvent::character(3, Vec3::ZERO));
    tick(&mut app);
    let entity = lookup(&app, NetworkId(3));

    app.world_mut().send_event(ActorDespawnEvent {
        network_id: NetworkId(3),
    });
    tick(&mut app);

    assert!(!app.world().entities().contains(entity));
    assert!(app.world().resource::<NetworkEntityMap>().is_empty());
}

#[test]
fn despawns_are_not_queued_without_replication() {
    let mut app = test_app();
    for _ in 0..50 {
        app.world_mut().send_event(ActorSpawnEvent::character(5, Vec3::ZERO));
        tick(&mut app);
        app.world_mut().send_event(ActorDespawnEvent {
            network_id: NetworkId(5),
        });
        tick(&mut app);
    }

    assert!(app.world().resource::<NetworkEntityMap>().is_empty());
    assert!(app.world().get_resource::<DespawnedIds>().is_none());
}

#[test]
fn move_command_sets_velocity_facing_and_walk() {
    let mut app = test_app();
    app.world_mut()
        .send_event(ActorSpawnEvent::character(1, Vec3::ZERO));
    tick(&mut app);
    let entity = lookup(&app, NetworkId(1));

    app.world_mut().send_event(LocomotionEvent {
        network_id: NetworkId(1),
        command: LocomotionCommand::Move {
            direction: Vec2::new(2.0, 0.0),
        },
    });
    tick(&mut app);

    let speed = SimulationConfig::default().move_speed;
    {
        let world = app.world();
        assert_eq!(world.get::<DesiredVelocity>(entity).unwrap().0, Vec3::X * speed);
        assert!((world.get::<Facing>(entity).unwrap().0 - FRAC_PI_2).abs() < 1e-6);
        assert!(world.get::<Position>(entity).unwrap().0.x > 0.0);
    }
    assert_eq!(core_of(&app, entity).motion(), Motion::Walk);

    app.world_mut().send_event(LocomotionEvent {
        network_id: NetworkId(1),
        command: LocomotionCommand::Stop,
    });
    tick(&mut app);

    assert_eq!(app.world().get::<DesiredVelocity>(entity).unwrap().0, Vec3::ZERO);
    assert!((app.world().get::<Facing>(entity).unwrap().0 - FRAC_PI_2).abs() < 1e-6);
    assert_eq!(core_of(&app, entity).motion(), Motion::Idle);
}

#[test]
fn stunned_actor_does_not_walk() {
    let mut app = test_app();
    let actor = spawn_kind(&mut app, HeadKind::Goblin, BodyKind::Goblin);
    edit_core(&mut app, actor, |core| core.set_flag(Flags::STUNNED, true));
    tick(&mut app);

    let id = *app.world().get::<NetworkId>(actor).unwrap();
    app.world_mut().send_event(LocomotionEvent {
        network_id: id,
        command: LocomotionCommand::Move { direction: Vec2::Y },
    });
    ticks(&mut app, 3);

    assert_eq!(app.world().get::<Position>(actor).unwrap().0, Vec3::ZERO);
}

#[test]
fn render_key_reflects_state_after_the_tick() {
    let mut app = test_app();
    let actor = spawn_kind(&mut app, HeadKind::Goblin, BodyKind::Goblin);
    app.world_mut().get_mut::<Facing>(actor).unwrap().0 = FRAC_PI_2;
    ticks(&mut app, 4);

    let key = *app.world().get::<RenderKey>(actor).unwrap();
    assert_eq!(key.sprite_id, 2);
    assert_eq!(key.motion, Motion::Idle);
    assert_eq!(key.direction, 2);
    assert_eq!(key.time_sample, core_of(&app, actor).motion_time_ms() / 100);
    assert!(key.visible);

    edit_core(&mut app, actor, |core| core.set_flag(Flags::HIDDEN, true));
    tick(&mut app);
    assert!(!app.world().get::<RenderKey>(actor).unwrap().visible);

    app.world_mut().resource_mut::<TickContext>().camera_yaw = FRAC_PI_2;
    tick(&mut app);
    assert_eq!(app.world().get::<RenderKey>(actor).unwrap().direction, 0);
}
