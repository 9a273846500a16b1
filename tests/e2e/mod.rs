mod fields;
mod lifecycle;
mod navigation;
mod search;
mod snackbar;
