//! Built-in sample network used when no CSV is given.
//!
//! Three route features forming a staircase, plus one cable laid along them
//! and a spur route split into two features that only meet end to end.
//!
//! ```text
//!                (10,10)━━━━━━━(20,10)━━━━(30,10)
//!                   ┃   C          D    E
//!                 B ┃
//!   (0,0)━━━━━━━(10,0)
//!           A
//! ```

pub const SAMPLE_CSV: &str = "\
layer,feature_id,part,seq,x,y\n\
Route,1,0,0,0.0,0.0\n\
Route,1,0,1,10.0,0.0\n\
Route,2,0,0,10.0,0.0\n\
Route,2,0,1,10.0,10.0\n\
Route,3,0,0,10.0,10.0\n\
Route,3,0,1,20.0,10.0\n\
Route,4,0,0,20.0,10.0\n\
Route,4,0,1,25.0,10.0\n\
Route,5,0,0,25.0,10.0\n\
Route,5,0,1,30.0,10.0\n\
Cable,100,0,0,0.0,0.0\n\
Cable,100,0,1,10.0,0.0\n\
Cable,100,0,2,10.0,10.0\n\
Cable,100,0,3,20.0,10.0\n\
";
