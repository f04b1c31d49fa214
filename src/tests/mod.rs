mod image_tests;
mod coordinate_tests;
mod conversion_tests;
mod colormap_tests;
mod utils_tests;
