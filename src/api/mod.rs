pub mod krx;
