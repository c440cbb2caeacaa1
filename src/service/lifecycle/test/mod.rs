mod support;

mod terminate;
