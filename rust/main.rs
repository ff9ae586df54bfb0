use log::info;
use multivariable::linalg::{find_null_space_basis, rank, Matrix, Vector};
use std::process::ExitCode;

fn sample_matrix() -> Result<Matrix, multivariable::error::MathError> {
    let columns = [
        [1.0, -3.0, 2.0],
        [-2.0, 6.0, -4.0],
        [2.0, -1.0, 5.0],
        [3.0, 1.0, 8.0],
        [-1.0, -7.0, -4.0],
    ]
    .iter()
    .map(|c| Vector::try_new(c.to_vec()))
    .collect::<Result<Vec<Vector>, _>>()?;
    Matrix::try_new(columns)
}

fn main() -> ExitCode {
    env_logger::init();

    let a = match sample_matrix() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("reducing {}x{} matrix", a.nrows(), a.ncols());
    println!("A =\n{}", a);
    println!("rank(A) = {}", rank(&a));

    let basis = find_null_space_basis(&a);
    println!("null space basis ({} vectors):", basis.len());
    for v in basis.iter() {
        println!("{}", v);
    }
    ExitCode::SUCCESS
}
