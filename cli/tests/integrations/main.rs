mod check;
mod run;
mod server;
