mod score_test;
