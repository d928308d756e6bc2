use a6281::{interface::BitBangLink, A6281};

fn main() {
    // placeholders, replace with pins and a delay from your HAL
    let pin = || embedded_hal_mock::eh1::digital::Mock::new(&[]);
    let delay = embedded_hal_mock::eh1::delay::NoopDelay::new();

    let link = BitBangLink::new(pin(), pin(), pin(), pin(), delay);
    let mut driver = A6281::new(link, 3).unwrap();

    // full calibration current on every channel
    let mut dot_correction = [0u8; 9];
    driver.set_dot_correction_all(&mut dot_correction, [127, 127, 127]);
    driver.write_dot_correction(&dot_correction).unwrap();

    let mut intensity = [0u16; 9];
    intensity[0] = 1023;

    driver.set_enabled(true).unwrap();

    loop {
        driver.write_intensity(&intensity).unwrap();

        // roll the lit channel through the chain for some kind of animation
        for i in 0..intensity.len() {
            intensity[if i == 0 { intensity.len() - 1 } else { i - 1 }] = intensity[i];
        }
    }
}
