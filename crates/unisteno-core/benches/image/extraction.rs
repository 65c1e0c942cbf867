use criterion::{criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use unisteno_core::media::image::ImageCarrier;
use unisteno_core::Engine;

pub fn image_extraction(c: &mut Criterion) {
    c.bench_function("Image Extraction", |b| {
        let mut carrier = ImageCarrier::from_rgb(RgbImage::from_fn(512, 512, |x, y| {
            Rgb([x as u8, y as u8, (x ^ y) as u8])
        }));
        let engine = Engine::default();
        engine
            .embed(&mut carrier, &[0x5a; 4096], "Secret42", "secret.bin")
            .expect("Cannot write secret message");

        b.iter(|| {
            engine
                .extract(&carrier, "Secret42")
                .expect("Failed to read the secret");
        })
    });
}

criterion_group!(benches, image_extraction);
criterion_main!(benches);
