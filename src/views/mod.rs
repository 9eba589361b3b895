mod detail;
mod grid;
mod legend;
