use randf::Rand;

fn main() {
    let mut rng = Rand::new();
    rng.seed(42);
    let x = rng.float32();
    println!("{x}");
}
