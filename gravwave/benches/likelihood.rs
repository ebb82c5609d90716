use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gravwave::geometry::{polarization_tensor, PolarizationMode};
use gravwave::{
    models, noise_weighted_inner_product, GravitationalWaveLikelihood, Likelihood,
    WaveformGenerator,
};
use rustfft::num_complex::Complex64;
use test_helpers::{
    flat_psd, injection_parameters, injection_sky, noisy_interferometer, SineGaussian,
    INJECTION_GEOCENT_TIME,
};

const SAMPLING_FREQUENCY: f64 = 4096.0;
const TIME_DURATION: f64 = 4.0;

fn bench_inner_product(c: &mut Criterion) {
    let n = (SAMPLING_FREQUENCY * TIME_DURATION) as usize / 2 + 1;
    let a: Vec<Complex64> = (0..n)
        .map(|k| Complex64::new((k as f64 * 0.01).sin(), (k as f64 * 0.02).cos()))
        .collect();
    let b: Vec<Complex64> = a.iter().map(|v| v.conj() * 0.5).collect();
    let psd: Vec<f64> = (0..n).map(|k| 1.0 + k as f64 * 1e-3).collect();

    c.bench_function("noise_weighted_inner_product_8193", |bencher| {
        bencher.iter(|| {
            noise_weighted_inner_product(
                black_box(&a),
                black_box(&b),
                black_box(&psd),
                black_box(TIME_DURATION),
            )
        })
    });
}

fn bench_polarization_tensor(c: &mut Criterion) {
    c.bench_function("polarization_tensor_plus", |bencher| {
        bencher.iter(|| {
            polarization_tensor(
                black_box(1.375),
                black_box(-1.2108),
                black_box(INJECTION_GEOCENT_TIME),
                black_box(2.659),
                PolarizationMode::Plus,
            )
        })
    });
}

fn bench_log_likelihood(c: &mut Criterion) {
    let generator = SineGaussian::new(SAMPLING_FREQUENCY, TIME_DURATION).unwrap();
    let truth = injection_parameters(1.0e3, 150.0);
    let polarizations = generator.frequency_domain_strain(&truth).unwrap();

    let interferometers: Vec<_> = [("H1", &*models::H1, 1), ("L1", &*models::L1, 2)]
        .into_iter()
        .map(|(name, geometry, seed)| {
            let mut ifo = noisy_interferometer(
                name,
                geometry,
                flat_psd(1.0, SAMPLING_FREQUENCY).unwrap(),
                SAMPLING_FREQUENCY,
                TIME_DURATION,
                seed,
            )
            .unwrap();
            ifo.inject_signal(&polarizations, &injection_sky(), INJECTION_GEOCENT_TIME)
                .unwrap();
            ifo
        })
        .collect();
    let likelihood = GravitationalWaveLikelihood::new(interferometers.clone(), generator).unwrap();
    let unknown_noise = GravitationalWaveLikelihood::new(interferometers, generator)
        .unwrap()
        .with_unknown_noise_amplitude("sigma");

    let mut group = c.benchmark_group("log_likelihood");
    group.bench_function("two_detectors_4s_4096Hz", |bencher| {
        bencher.iter(|| likelihood.log_likelihood(black_box(&truth)))
    });
    group.bench_function("with_unknown_noise_amplitude", |bencher| {
        let mut parameters = truth.clone();
        parameters.insert("sigma".to_string(), 1.0);
        bencher.iter(|| unknown_noise.log_likelihood(black_box(&parameters)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_inner_product,
    bench_polarization_tensor,
    bench_log_likelihood,
);
criterion_main!(benches);
