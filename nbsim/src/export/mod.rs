pub mod trajectory_csv;
