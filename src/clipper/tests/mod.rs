mod join_tests;
mod out_pt_tests;
mod out_rec_tests;
mod scanbeam_tests;
mod t_edge_tests;
