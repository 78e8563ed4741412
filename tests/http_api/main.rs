//! HTTP API tests for the wagon board, photo listing, and photo upload.

mod test_photos;
mod test_upload;
mod test_wagons;
