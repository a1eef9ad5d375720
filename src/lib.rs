pub mod config;
pub mod phrase_compiler;
pub mod phrase_rand;

/*
Layout of a small compiled ROM, banks in file name order
(greet.txt: "world", primary.txt: "hello {greet}")

        0x0000  word bank start pointer   -> 0x0012
        0x0002  primary bank pointer      -> 0x000a
Banks   0x0004  [greet]   1 phrase        -> 0x0007
        0x0007            1 token         -> world
        0x000a  [primary] 1 phrase        -> 0x000d
        0x000d            2 tokens        -> hello, [greet] at 0x0004
Words   0x0012  world
        ......  hello
*/
