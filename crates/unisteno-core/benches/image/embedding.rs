use criterion::{criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use unisteno_core::media::image::ImageCarrier;
use unisteno_core::Engine;

pub fn image_embedding(c: &mut Criterion) {
    c.bench_function("Image Embedding", |b| {
        let plain_image = ImageCarrier::from_rgb(RgbImage::from_fn(512, 512, |x, y| {
            Rgb([x as u8, y as u8, (x ^ y) as u8])
        }));
        let engine = Engine::default();
        let secret = vec![0x5a; 4096];

        b.iter(|| {
            let mut carrier = plain_image.clone();
            engine
                .embed(&mut carrier, &secret, "Secret42", "secret.bin")
                .expect("Cannot write secret message");
        })
    });
}

criterion_group!(benches, image_embedding);
criterion_main!(benches);
