use raven_hunt::entities::Rgb;
use raven_hunt::picking::PickingBuffer;

const RED: Rgb = Rgb(200, 0, 0);
const BLUE: Rgb = Rgb(0, 0, 200);

#[test]
fn fresh_buffer_is_transparent() {
    let p = PickingBuffer::new(100, 50);
    assert_eq!((p.width(), p.height()), (100, 50));
    assert_eq!(p.sample(0.0, 0.0), Some([0, 0, 0, 0]));
    assert_eq!(p.sample(99.0, 49.0), Some([0, 0, 0, 0]));
}

#[test]
fn out_of_bounds_samples_are_none() {
    let p = PickingBuffer::new(100, 50);
    assert_eq!(p.sample(-1.0, 10.0), None);
    assert_eq!(p.sample(10.0, -0.5), None);
    assert_eq!(p.sample(100.0, 10.0), None);
    assert_eq!(p.sample(10.0, 50.0), None);
    assert_eq!(p.sample(f32::NAN, 10.0), None);
}

#[test]
fn painting_is_invisible_until_presented() {
    let mut p = PickingBuffer::new(100, 50);
    p.fill_rect(10.0, 10.0, 20.0, 20.0, RED);
    assert_eq!(p.sample(15.0, 15.0), Some([0, 0, 0, 0]));
    p.present();
    assert_eq!(p.sample(15.0, 15.0), Some([200, 0, 0, 255]));
}

#[test]
fn presented_frame_survives_next_clear() {
    let mut p = PickingBuffer::new(100, 50);
    p.fill_rect(10.0, 10.0, 20.0, 20.0, RED);
    p.present();
    p.clear();
    // Still the last presented frame while the next one is being painted.
    assert_eq!(p.sample(15.0, 15.0), Some([200, 0, 0, 255]));
    p.present();
    assert_eq!(p.sample(15.0, 15.0), Some([0, 0, 0, 0]));
}

#[test]
fn fill_covers_rounded_pixel_span() {
    let mut p = PickingBuffer::new(100, 50);
    p.fill_rect(10.4, 5.6, 9.2, 4.0, RED);
    p.present();
    // x: round(10.4)=10 .. round(19.6)=20, y: round(5.6)=6 .. round(9.6)=10
    assert_eq!(p.sample(10.0, 6.0), Some([200, 0, 0, 255]));
    assert_eq!(p.sample(19.0, 9.0), Some([200, 0, 0, 255]));
    assert_eq!(p.sample(20.0, 9.0), Some([0, 0, 0, 0]));
    assert_eq!(p.sample(10.0, 5.0), Some([0, 0, 0, 0]));
    assert_eq!(p.sample(10.0, 10.0), Some([0, 0, 0, 0]));
}

#[test]
fn fill_is_clipped_to_buffer() {
    let mut p = PickingBuffer::new(100, 50);
    p.fill_rect(-10.0, -10.0, 20.0, 20.0, RED);
    p.fill_rect(95.0, 45.0, 30.0, 30.0, BLUE);
    p.fill_rect(-500.0, 10.0, 20.0, 20.0, BLUE);
    p.present();
    assert_eq!(p.sample(9.0, 9.0), Some([200, 0, 0, 255]));
    assert_eq!(p.sample(10.0, 10.0), Some([0, 0, 0, 0]));
    assert_eq!(p.sample(99.0, 49.0), Some([0, 0, 200, 255]));
    assert_eq!(p.sample(0.0, 20.0), Some([0, 0, 0, 0]));
}

#[test]
fn later_fills_paint_over_earlier_ones() {
    let mut p = PickingBuffer::new(100, 50);
    p.fill_rect(0.0, 0.0, 50.0, 50.0, RED);
    p.fill_rect(20.0, 20.0, 10.0, 10.0, BLUE);
    p.present();
    assert_eq!(p.sample(25.0, 25.0), Some([0, 0, 200, 255]));
    assert_eq!(p.sample(5.0, 5.0), Some([200, 0, 0, 255]));
}
