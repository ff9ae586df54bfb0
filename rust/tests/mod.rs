mod calculus;
mod inverse;
mod null_space;
