use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

pub type Shared<T> = Arc<Mutex<T>>;

/// Générateur pseudo-aléatoire partagé par tous les handlers
pub type SharedRng = Shared<StdRng>;

pub fn new_state<T>(value: T) -> Shared<T> {
    Arc::new(Mutex::new(value))
}

/// Seed fixe => sorties reproductibles, sinon entropie de l'OS
pub fn new_rng(seed: Option<u64>) -> SharedRng {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    new_state(rng)
}
