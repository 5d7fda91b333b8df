use std::path::PathBuf;

pub enum Action {
    Parse {
        path: PathBuf,
        json: bool,
    },
    Summary {
        paths: Vec<PathBuf>,
        json: bool,
    },
}
