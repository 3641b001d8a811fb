pub mod maze_2d;
