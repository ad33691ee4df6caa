pub mod variations;
