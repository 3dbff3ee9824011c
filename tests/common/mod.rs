pub mod synthetic_bmp;
