pub mod advance_prompt;
pub mod attempt_row;
pub mod feedback;
pub mod progress_bar;
pub mod tile_board;
