extern crate potential_spline;

use potential_spline::Spline;

fn main() {

    let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
    let ys = [1.0, 0.0, -2.0, 1.0, 1.0];

    let spline = match Spline::from_columns(&xs, &ys) {
        Ok(spline) => spline,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let x_min = 0.0;
    let x_max = 6.0;
    let number_of_steps = 60;
    let step = (x_max - x_min) / number_of_steps as f64;

    println!("x;y;dy;d2y");
    for i in 0..=number_of_steps {
        let x = x_min + step * i as f64;
        println!(
            "{:.2};{:.3};{:.3};{:.3}",
            x,
            spline.extrapolate(x),
            spline.derivative(x, 1),
            spline.derivative(x, 2)
        );
    }
}
