//! Bullet pool demo
//!
//! Fires bullets from a turret for a few simulated frames. Expired bullets
//! disable themselves and go back to their pool instead of being despawned.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example bullet_pool

use redlilium_pool::pool::{self, destroy_all_pools, spawn_from};
use redlilium_pool::{
    Component, Disabled, Entity, Pool, PoolConfig, PoolRegistry, PoolResult, Quat, Reusable,
    Transform, Vec3, Without, World,
};

const FRAME_TIME: f32 = 1.0 / 60.0;
const FRAMES: u32 = 240;
const FIRE_INTERVAL: u32 = 6;

#[derive(Component, Clone)]
struct Bullet {
    speed: f32,
    lifetime: f32,
    age: f32,
    /// How many times this instance has been fired
    shots: u32,
}

impl Reusable for Bullet {
    fn first_start(&mut self) {
        log::debug!("Bullet warmed up");
    }

    fn on_respawn(&mut self) {
        self.age = 0.0;
        self.shots += 1;
    }
}

fn step_bullets(world: &mut World) -> PoolResult<usize> {
    let mut expired: Vec<Entity> = Vec::new();

    let mut query =
        world.query_filtered::<(Entity, &mut Transform, &mut Bullet), Without<Disabled>>();
    for (entity, mut transform, mut bullet) in query.iter_mut(world) {
        bullet.age += FRAME_TIME;
        let offset = transform.forward() * bullet.speed * FRAME_TIME;
        transform.translate(offset);
        if bullet.age >= bullet.lifetime {
            expired.push(entity);
        }
    }

    for &entity in &expired {
        pool::disable(world, entity)?;
    }
    Ok(expired.len())
}

fn main() -> PoolResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut world = World::new();
    let template = Bullet {
        speed: 40.0,
        lifetime: 0.5,
        age: 0.0,
        shots: 0,
    };
    let mut bullets = Pool::with_extras(
        template,
        Transform::default().with_scale(Vec3::splat(0.1)),
        PoolConfig::new("bullets").with_initial_size(4),
    );
    bullets.start(&mut world);

    let mut registry = PoolRegistry::new();
    let bullet_pool = registry.insert(bullets);
    world.insert_resource(registry);

    let mut returned = 0;
    for frame in 0..FRAMES {
        if frame % FIRE_INTERVAL == 0 {
            let angle = frame as f32 * 0.05;
            spawn_from(&mut world, bullet_pool, Vec3::ZERO, Quat::from_rotation_y(angle))?;
        }
        returned += step_bullets(&mut world)?;
    }

    let mut all_bullets = world.query::<&Bullet>();
    let instances = all_bullets.iter(&world).count();
    let most_fired = all_bullets
        .iter(&world)
        .map(|bullet| bullet.shots)
        .max()
        .unwrap_or(0);

    log::info!(
        "Fired {} bullets with {instances} instances ({returned} returned, busiest instance fired {most_fired} times)",
        FRAMES.div_ceil(FIRE_INTERVAL)
    );

    let destroyed = destroy_all_pools(&mut world);
    log::info!("Destroyed {destroyed} pool(s), {} entities left", world.entities().len());
    Ok(())
}
