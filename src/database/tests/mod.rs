mod migrations_test;
